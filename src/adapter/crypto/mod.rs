pub mod argon2;
pub mod signature;
