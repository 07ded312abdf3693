pub mod auth;
pub mod contract;
pub mod discussion;
pub mod gig;
pub mod invitation;
pub mod notification;
pub mod payment;
pub mod presence;
pub mod project;
pub mod user;
pub mod withdrawal;
pub mod workspace;
