pub mod price_level;
pub mod volume;
