pub mod attempt;
pub mod competitor;
pub mod standings;
