//! # Settings
//!
//! Resolves where the menu is downloaded from and where the cache, cart and orders
//! live. Each value is taken from the first layer that defines it:
//!
//! 1. command-line flags ([`SettingsOverrides`]),
//! 2. the settings file: `--config <PATH>`, else `./pizza.toml`, else
//!    `~/.config/pizza-prompter/config.toml` (the first one that exists),
//! 3. built-in defaults (the files sit in the current directory).
//!
//! Paths from any layer may use `~` and environment variables.

use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::{
    constants::{
        DEFAULT_CACHE_FILENAME, DEFAULT_CART_FILENAME, DEFAULT_ENDPOINT_URL,
        DEFAULT_ORDERS_DIRNAME, DEFAULT_TIMEOUT_SECS, LOCAL_CONFIG_FILENAME,
    },
    core::paths::{self, PathError},
};

/// Represents errors that can occur while resolving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// `--config` points to a file that does not exist.
    #[error("Settings file '{0}' does not exist")]
    ConfigNotFound(PathBuf),
    /// The settings file could not be read.
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        /// The settings file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid TOML or has unknown keys.
    #[error("Invalid settings file '{path}': {source}")]
    Parse {
        /// The settings file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// A configured path could not be expanded.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The endpoint is not an `http(s)` URL.
    #[error("The menu endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
    /// The timeout is zero.
    #[error("'timeout_secs' must be greater than zero")]
    InvalidTimeout,
}

/// The deserialized structure of a settings file. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    /// URL of the menu document.
    pub endpoint: Option<String>,
    /// Where the last downloaded menu is kept.
    pub cache_file: Option<String>,
    /// Where the cart is kept.
    pub cart_file: Option<String>,
    /// Where orders are written.
    pub orders_dir: Option<String>,
    /// Seconds before the download gives up.
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line. They win over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// An explicit settings file.
    pub config: Option<PathBuf>,
    /// See [`SettingsFile::endpoint`].
    pub endpoint: Option<String>,
    /// See [`SettingsFile::cache_file`].
    pub cache_file: Option<String>,
    /// See [`SettingsFile::cart_file`].
    pub cart_file: Option<String>,
    /// See [`SettingsFile::orders_dir`].
    pub orders_dir: Option<String>,
    /// Skip the download and use the cached menu.
    pub offline: bool,
}

/// The fully resolved settings of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL of the menu document.
    pub endpoint: String,
    /// Absolute path of the menu cache.
    pub cache_file: PathBuf,
    /// Absolute path of the cart file.
    pub cart_file: PathBuf,
    /// Absolute path of the orders directory.
    pub orders_dir: PathBuf,
    /// Download timeout.
    pub timeout: Duration,
    /// Whether to skip the download.
    pub offline: bool,
}

/// Resolves the session settings from the command line, the settings file and the defaults.
pub fn resolve_settings(overrides: &SettingsOverrides) -> Result<Settings, SettingsError> {
    let file = match locate_settings_file(overrides.config.as_deref())? {
        Some(path) => {
            debug!("Using settings file '{}'", path.display());
            load_settings_file(&path)?
        }
        None => {
            debug!("No settings file found, using defaults");
            SettingsFile::default()
        }
    };
    merge(&file, overrides)
}

/// Reads and parses a settings file.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn locate_settings_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, SettingsError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(Some(path.to_path_buf()))
        } else {
            Err(SettingsError::ConfigNotFound(path.to_path_buf()))
        };
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILENAME);
    if local.is_file() {
        return Ok(Some(local));
    }
    Ok(paths::user_config_file().filter(|path| path.is_file()))
}

/// Layers `overrides` over `file` over the defaults.
pub fn merge(file: &SettingsFile, overrides: &SettingsOverrides) -> Result<Settings, SettingsError> {
    let pick = |cli: &Option<String>, from_file: &Option<String>, default: &str| -> String {
        cli.clone()
            .or_else(|| from_file.clone())
            .unwrap_or_else(|| default.to_string())
    };

    let endpoint = pick(&overrides.endpoint, &file.endpoint, DEFAULT_ENDPOINT_URL);
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(SettingsError::InvalidEndpoint(endpoint));
    }

    let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(SettingsError::InvalidTimeout);
    }

    let settings = Settings {
        endpoint,
        cache_file: paths::expand_path(&pick(
            &overrides.cache_file,
            &file.cache_file,
            DEFAULT_CACHE_FILENAME,
        ))?,
        cart_file: paths::expand_path(&pick(
            &overrides.cart_file,
            &file.cart_file,
            DEFAULT_CART_FILENAME,
        ))?,
        orders_dir: paths::expand_path(&pick(
            &overrides.orders_dir,
            &file.orders_dir,
            DEFAULT_ORDERS_DIRNAME,
        ))?,
        timeout: Duration::from_secs(timeout_secs),
        offline: overrides.offline,
    };
    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = merge(&SettingsFile::default(), &SettingsOverrides::default()).unwrap();

        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT_URL);
        assert!(settings.cart_file.is_absolute());
        assert!(settings.cart_file.ends_with("cart.json"));
        assert!(settings.cache_file.ends_with("ingredients.cache.json"));
        assert!(settings.orders_dir.ends_with("orders"));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(!settings.offline);
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let file = SettingsFile {
            endpoint: Some("http://menu.local/menu.json".to_string()),
            cart_file: Some("/tmp/from-file/cart.json".to_string()),
            orders_dir: Some("/tmp/from-file/orders".to_string()),
            timeout_secs: Some(3),
            ..Default::default()
        };
        let overrides = SettingsOverrides {
            cart_file: Some("/tmp/from-cli/cart.json".to_string()),
            offline: true,
            ..Default::default()
        };

        let settings = merge(&file, &overrides).unwrap();

        assert_eq!(settings.endpoint, "http://menu.local/menu.json");
        assert_eq!(settings.cart_file, PathBuf::from("/tmp/from-cli/cart.json"));
        assert_eq!(settings.orders_dir, PathBuf::from("/tmp/from-file/orders"));
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert!(settings.offline);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let overrides = SettingsOverrides {
            endpoint: Some("ftp://menu.local".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            merge(&SettingsFile::default(), &overrides),
            Err(SettingsError::InvalidEndpoint(_))
        ));

        let file = SettingsFile {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            merge(&file, &SettingsOverrides::default()),
            Err(SettingsError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_load_settings_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pizza.toml");
        fs::write(
            &path,
            "endpoint = \"https://example.com/menu.json\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let file = load_settings_file(&path).unwrap();
        assert_eq!(file.endpoint.as_deref(), Some("https://example.com/menu.json"));
        assert_eq!(file.timeout_secs, Some(5));
        assert_eq!(file.cart_file, None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pizza.toml");
        fs::write(&path, "endpiont = \"https://example.com\"\n").unwrap();

        assert!(matches!(
            load_settings_file(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        let overrides = SettingsOverrides {
            config: Some(dir.path().join("missing.toml")),
            ..Default::default()
        };
        assert!(matches!(
            resolve_settings(&overrides),
            Err(SettingsError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_explicit_config_is_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let orders = dir.path().join("my-orders");
        fs::write(&path, format!("orders_dir = {:?}\n", orders.display().to_string())).unwrap();

        let settings = resolve_settings(&SettingsOverrides {
            config: Some(path),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.orders_dir, orders);
    }
}
