// src/constants.rs

/// The endpoint the menu is downloaded from when no other is configured.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://itec-minneapolis.s3.us-west-2.amazonaws.com/ingredients.json";

/// The name of the local copy of the last successfully downloaded menu.
pub const DEFAULT_CACHE_FILENAME: &str = "ingredients.cache.json";

/// The name of the file holding the in-progress cart.
pub const DEFAULT_CART_FILENAME: &str = "cart.json";

/// The name of the directory completed orders are written to.
pub const DEFAULT_ORDERS_DIRNAME: &str = "orders";

/// The settings file looked up in the current directory.
pub const LOCAL_CONFIG_FILENAME: &str = "pizza.toml";

/// The name of the directory inside the user config directory (`~/.config/pizza-prompter`).
pub const USER_CONFIG_DIRNAME: &str = "pizza-prompter";

/// The settings file looked up in the user config directory.
pub const USER_CONFIG_FILENAME: &str = "config.toml";

/// Seconds before the menu download gives up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `chrono` format of an order identifier (`YYYYMMDD_HHMMSS`).
pub const ORDER_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Width of the label column of a priced line.
pub const LABEL_WIDTH: usize = 48;

/// Width of the amount column of a priced line (excluding the `$`).
pub const PRICE_WIDTH: usize = 8;

/// Width of the horizontal rules printed around a receipt.
pub const RULE_WIDTH: usize = 58;
