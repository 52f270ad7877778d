//! Resume screener library

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod input;
pub mod llm;
pub mod logging;
pub mod logs;
pub mod output;
pub mod scoring;

pub use config::Config;
pub use error::{Result, ScreenerError};
