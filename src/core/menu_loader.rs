//! # Menu Loader
//!
//! Loads the menu once at startup. The network is asked first; when it cannot be
//! reached the copy cached by the last successful download is used instead.
//!
//! 1. **Fetch:** the [`MenuFetcher`] returns the raw body, or a [`FetchError`].
//! 2. **Parse:** a body from the network that is not JSON is a hard failure. The
//!    server was reachable, so the cache would only hide the problem.
//! 3. **Cache:** a good body is written to the cache file. Failing to do so is
//!    reported back to the caller but does not fail the load.
//! 4. **Validate:** the JSON from either source is deserialized into a
//!    [`MenuDocument`] and converted into a [`Menu`], producing a descriptive
//!    [`ShapeError`] when it does not have the expected structure.

use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{
    models::{Menu, MenuDocument, ShapeError},
    system::http::{FetchError, MenuFetcher},
};

/// Reasons the menu could not be loaded. All of them end the session.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The network failed and there is no cached menu to fall back to.
    #[error("Unable to connect to the menu endpoint, and no cached menu exists at '{cache}' ({source})")]
    NetworkUnavailableNoCache {
        /// The missing cache file.
        cache: PathBuf,
        /// Why the download failed.
        #[source]
        source: FetchError,
    },
    /// The network failed and the cache file exists but cannot be read.
    #[error("Unable to read the cached menu at '{cache}': {source}")]
    CacheUnreadable {
        /// The cache file.
        cache: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The server answered, but not with JSON.
    #[error("Malformed menu data received from the endpoint: {source}")]
    MalformedServerData {
        /// The JSON parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The cache file is not JSON.
    #[error("Malformed menu data in the cache file '{cache}': {source}")]
    MalformedCacheData {
        /// The cache file.
        cache: PathBuf,
        /// The JSON parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The JSON does not describe a usable menu.
    #[error("Menu data is improperly formed: {source}")]
    MalformedShape {
        /// What is wrong with the document.
        #[source]
        source: ShapeError,
    },
}

/// Where a loaded menu came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrigin {
    /// Freshly downloaded.
    Network,
    /// Read from the cache file because the download failed.
    Cache,
}

/// The outcome of a successful [`load_menu`].
#[derive(Debug)]
pub struct MenuLoad {
    /// The validated menu.
    pub menu: Menu,
    /// Where the menu came from.
    pub origin: MenuOrigin,
    /// Set when the download succeeded but the cache file could not be refreshed.
    pub cache_error: Option<std::io::Error>,
}

/// Loads and validates the menu, falling back to `cache_path` when `fetcher` fails.
///
/// # Errors
/// See [`LoadError`]. No step is retried.
pub fn load_menu(fetcher: &dyn MenuFetcher, cache_path: &Path) -> Result<MenuLoad, LoadError> {
    debug!("Loading menu from '{}'", fetcher.source());

    let (value, origin, cache_error) = match fetcher.fetch() {
        Ok(body) => {
            let value: serde_json::Value = serde_json::from_str(&body)
                .map_err(|source| LoadError::MalformedServerData { source })?;

            let cache_error = write_cache(cache_path, &body).err();
            if let Some(e) = &cache_error {
                warn!("Could not save menu cache '{}': {}", cache_path.display(), e);
            }
            (value, MenuOrigin::Network, cache_error)
        }
        Err(fetch_error) => {
            warn!("Menu download failed, trying the cache: {}", fetch_error);
            (read_cache(cache_path, fetch_error)?, MenuOrigin::Cache, None)
        }
    };

    let menu = parse_menu(value).map_err(|source| LoadError::MalformedShape { source })?;
    info!(
        "Menu loaded from {:?}: {} categories, {} toppings",
        origin,
        menu.categories().len(),
        menu.toppings().len()
    );

    Ok(MenuLoad {
        menu,
        origin,
        cache_error,
    })
}

/// Converts already-parsed JSON into a validated menu.
pub fn parse_menu(value: serde_json::Value) -> Result<Menu, ShapeError> {
    let document: MenuDocument = serde_json::from_value(value)?;
    Menu::try_from(document)
}

fn write_cache(cache_path: &Path, body: &str) -> std::io::Result<()> {
    if let Some(parent) = cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(cache_path, body)?;
    debug!("Menu cached at '{}'", cache_path.display());
    Ok(())
}

fn read_cache(cache_path: &Path, fetch_error: FetchError) -> Result<serde_json::Value, LoadError> {
    let data = match fs::read_to_string(cache_path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NetworkUnavailableNoCache {
                cache: cache_path.to_path_buf(),
                source: fetch_error,
            });
        }
        Err(source) => {
            return Err(LoadError::CacheUnreadable {
                cache: cache_path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&data).map_err(|source| LoadError::MalformedCacheData {
        cache: cache_path.to_path_buf(),
        source,
    })
}
