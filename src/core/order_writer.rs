// src/core/order_writer.rs

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{
    constants::ORDER_ID_FORMAT,
    models::{Order, Pizza},
};

/// Represents errors that can occur while writing an order file.
#[derive(Error, Debug)]
pub enum OrderError {
    /// The orders directory could not be created or the order file written.
    #[error("Failed to write order file '{path}': {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The order could not be serialized.
    #[error("Failed to serialize order: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where an order ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// The order identifier (`YYYYMMDD_HHMMSS`), as stored in the file.
    pub id: String,
    /// The written order file.
    pub path: PathBuf,
}

/// Builds the identifier of an order placed at `now`.
pub fn order_id(now: &DateTime<Local>) -> String {
    now.format(ORDER_ID_FORMAT).to_string()
}

/// The file name of the `attempt`-th candidate for `id`: `<id>.json`, then `<id>_0.json`, `<id>_1.json`, ...
fn candidate_path(orders_dir: &Path, id: &str, attempt: Option<u64>) -> PathBuf {
    match attempt {
        None => orders_dir.join(format!("{id}.json")),
        Some(n) => orders_dir.join(format!("{id}_{n}.json")),
    }
}

/// Writes `cart` as a new order file in `orders_dir`.
///
/// The file is named after the checkout time. If an order with the same name already
/// exists (two checkouts within one second), a numeric suffix is appended, counting up
/// until a free name is found. Existing orders are never overwritten.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot be written.
/// The caller's cart is never touched.
pub fn create_order(
    orders_dir: &Path,
    cart: &[Pizza],
    now: DateTime<Local>,
) -> Result<OrderReceipt, OrderError> {
    let id = order_id(&now);
    let order = Order {
        id: id.clone(),
        date: now,
        items: cart.to_vec(),
    };
    let data = serde_json::to_string_pretty(&order)?;

    fs::create_dir_all(orders_dir).map_err(|source| OrderError::Io {
        path: orders_dir.to_path_buf(),
        source,
    })?;

    let mut attempt: Option<u64> = None;
    loop {
        let path = candidate_path(orders_dir, &id, attempt);
        // `create_new` makes the existence check and the creation a single step.
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                if let Err(source) = file.write_all(data.as_bytes()).and_then(|()| file.sync_all()) {
                    drop(file);
                    discard_partial_order(&path);
                    return Err(OrderError::Io { path, source });
                }
                info!("Order '{}' written to '{}'", id, path.display());
                return Ok(OrderReceipt { id, path });
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Order file '{}' already exists", path.display());
                attempt = Some(attempt.map_or(0, |n| n + 1));
            }
            Err(source) => return Err(OrderError::Io { path, source }),
        }
    }
}

/// Removes an order file that could not be written completely.
/// Returns whether the file is gone; a failure is logged.
fn discard_partial_order(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not remove partial order file '{}': {}", path.display(), e);
            false
        }
    }
}
