pub mod config;
pub mod planets;
