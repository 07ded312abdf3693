pub mod local;
pub mod razorpay;
