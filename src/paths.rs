//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `STATIC_DIR`: Override the static asset directory (default: "static")
//!
//! This allows running isolated server instances side by side:
//! ```bash
//! DATA_DIR=data/demo PORT=3001 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Lazily initialized static directory from STATIC_DIR env var
static STATIC_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Directory served as the site root (css, fixed html documents)
pub fn static_dir() -> &'static str {
    STATIC_DIR_VALUE.get_or_init(|| env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()))
}

/// SQLite database holding the persisted portal state
pub fn state_db_path() -> String {
    format!("{}/portal.db", data_dir())
}

/// Uploaded avatar images, served under /uploads
pub fn uploads_dir() -> String {
    format!("{}/uploads", data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    // OnceLock initializes once, so these only check the path shapes.

    #[test]
    fn test_data_dir_default() {
        let dir = data_dir();
        assert!(!dir.is_empty());
    }

    #[test]
    fn test_state_db_path_format() {
        assert!(state_db_path().ends_with("/portal.db"));
    }

    #[test]
    fn test_uploads_dir_format() {
        assert!(uploads_dir().ends_with("/uploads"));
    }
}
