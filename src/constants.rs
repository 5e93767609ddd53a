//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Placeholder avatar service; new friends get `?u=<id>` appended
pub const DEFAULT_IMAGE_URL: &str = "https://i.pravatar.cc/48";

/// Application name
pub const APP_NAME: &str = "Eat-'n-Split";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name used under the platform data dir for logs
pub const APP_DIR_NAME: &str = "eat-n-split";

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "eat-n-split.log";

/// Overrides the log directory when set
pub const LOG_DIR_ENV: &str = "EAT_N_SPLIT_LOG_DIR";

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
