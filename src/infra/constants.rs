pub const MAX_PER_PAGE: i64 = 100;
pub const DEFAULT_PER_PAGE: i64 = 20;
/// Upper bound for any single money amount, in the smallest currency unit.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;
