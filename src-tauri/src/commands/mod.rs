pub mod config;
pub mod weeks;
