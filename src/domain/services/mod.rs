pub mod access;
pub mod contract_lifecycle;
pub mod settlement;
