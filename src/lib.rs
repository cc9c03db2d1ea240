// Library interface for rera-scraper
// This allows tests and the binary to use the scraper components

pub mod browser;
pub mod config;
pub mod driver;
pub mod extract;
pub mod helpers;
pub mod models;
pub mod output;
