// src/system/http.rs

use log::debug;
use std::time::Duration;
use thiserror::Error;

/// Reasons the menu could not be downloaded.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be configured.
    #[error("Could not set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The server could not be reached (DNS, connection, TLS, timeout).
    #[error("Could not reach '{url}': {source}")]
    Transport {
        /// The requested URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("'{url}' answered with HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The response body could not be read as text.
    #[error("Could not read the response from '{url}': {source}")]
    Body {
        /// The requested URL.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },
    /// Downloading was disabled with `--offline`.
    #[error("Network access is disabled (offline mode)")]
    Offline,
}

/// A source of raw menu documents.
pub trait MenuFetcher {
    /// Returns the raw body of the menu document.
    fn fetch(&self) -> Result<String, FetchError>;

    /// A human-readable description of where the menu comes from.
    fn source(&self) -> &str;
}

/// Downloads the menu with a blocking HTTP GET.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpFetcher {
    /// Creates a fetcher for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl MenuFetcher for HttpFetcher {
    fn fetch(&self) -> Result<String, FetchError> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| FetchError::Body {
            url: self.url.clone(),
            source,
        })
    }

    fn source(&self) -> &str {
        &self.url
    }
}

/// A fetcher that never reaches the network, so the cached menu is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineFetcher;

impl MenuFetcher for OfflineFetcher {
    fn fetch(&self) -> Result<String, FetchError> {
        Err(FetchError::Offline)
    }

    fn source(&self) -> &str {
        "offline"
    }
}
