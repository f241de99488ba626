//! Path resolution for dispatch directories.
//!
//! Provides XDG-compliant path resolution for the default database
//! location.

use std::env;
use std::path::PathBuf;

/// Get XDG-compliant data directory for dispatch.
///
/// # Returns
/// Path to data directory: `~/.local/share/dispatch/`
///
/// # Panics
/// Panics if neither XDG_DATA_HOME nor HOME is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".local/share")
        });

    data_home.join("dispatch")
}

/// Get database file path (data_dir/dispatch.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("dispatch.db")
}
