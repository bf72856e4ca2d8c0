pub mod spectrum;
pub mod sweep;
