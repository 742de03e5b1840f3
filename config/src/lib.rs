//! Load a project `.env` and apply it to the process environment with
//! priority **existing env > .env**, then read typed runtime settings.
//!
//! Call [`load_and_apply`] once at startup, then [`Settings::from_env`] for
//! the typed view.

mod dotenv;
mod settings;

use std::path::Path;
use thiserror::Error;

pub use settings::{Settings, DEFAULT_RESEARCH_SYSTEM_PROMPT};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Loads the project `.env` (current directory, or `override_dir` if given)
/// and sets environment variables only for keys that are **not** already set,
/// so the existing environment has highest priority.
pub fn load_and_apply(override_dir: Option<&Path>) -> Result<(), LoadError> {
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    for (key, value) in dotenv_map {
        if std::env::var(&key).is_err() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}
