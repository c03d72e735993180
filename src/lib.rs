pub mod cli;
pub mod common;
pub mod downloader;
pub mod parser;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
