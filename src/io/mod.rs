pub mod prices;
pub mod reporting;
