//! Configuration loading for the slideshow viewer.
//!
//! All user-tunable settings are loaded from `conf/config.toml` if present.
//! Missing or invalid entries fall back to defaults so the window can still
//! open.

mod defaults;
mod io;
mod models;

pub use io::{load_config, parse_config};
pub use models::{AppConfig, LogLevel};
