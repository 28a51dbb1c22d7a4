pub mod app;
pub mod cli;
pub mod config;
pub mod drive_api;
pub mod error;
pub mod materialize;
pub mod outline;
pub mod types;

pub use error::{Error, Result};
