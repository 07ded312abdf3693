pub mod auth;
pub mod contract;
pub mod discussion;
pub mod gig;
pub mod id;
pub mod invitation;
pub mod notification;
pub mod pagination;
pub mod payment;
pub mod presence;
pub mod project;
pub mod session;
pub mod user;
pub mod withdrawal;
pub mod workspace;
