// src/core/paths.rs

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{USER_CONFIG_DIRNAME, USER_CONFIG_FILENAME};

/// Reasons a configured path could not be resolved.
#[derive(Error, Debug)]
pub enum PathError {
    /// `~` or a variable in the template could not be expanded.
    #[error("Failed to expand path template '{template}': {message}")]
    Expansion {
        /// The path as configured.
        template: String,
        /// What went wrong.
        message: String,
    },
    /// The current directory is needed for a relative path and is unavailable.
    #[error("Could not resolve '{path}' to an absolute path: {source}")]
    Absolute {
        /// The expanded path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Returns the path to the per-user config directory (`~/.config/pizza-prompter`).
/// Unlike the files it holds, the directory is never created: it is only read from.
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIRNAME))
}

/// Returns the path to the per-user settings file, if a config directory exists on this platform.
pub fn user_config_file() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join(USER_CONFIG_FILENAME))
}

/// Expands a path template string, resolving the home directory (`~`) and
/// environment variables (`$VAR`, `${VAR}`), then makes it absolute against the
/// current directory.
///
/// # Errors
/// Returns an error if a referenced variable is not set, or the current directory
/// cannot be determined for a relative path.
pub fn expand_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        message: e.to_string(),
    })?;
    absolute(Path::new(expanded.as_ref()))
}

fn absolute(path: &Path) -> Result<PathBuf, PathError> {
    std::path::absolute(path).map_err(|source| PathError::Absolute {
        path: path.display().to_string(),
        source,
    })
}
