//! # System Interaction Layer
//!
//! This module provides the boundary between the application and the outside world
//! that is not the local filesystem.
//!
//! ## Modules
//!
//! - **`http`**: downloads the menu document. The [`http::MenuFetcher`] trait lets the
//!   loader run against the real endpoint, an offline stand-in, or a test double.

/// Menu download over HTTP.
pub mod http;
