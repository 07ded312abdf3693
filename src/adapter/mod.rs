pub mod crypto;
pub mod db;
pub mod http;
pub mod payment;
