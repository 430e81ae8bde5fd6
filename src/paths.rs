//! Path resolution for school data files.
//!
//! Provides XDG-compliant defaults for where the database lives.

use std::env;
use std::path::PathBuf;

/// Directory name under the XDG data home.
const APP_DIR: &str = "school";

/// Get XDG-compliant data directory.
///
/// # Returns
/// `$XDG_DATA_HOME/school`, else `~/.local/share/school`. Without either
/// variable set, falls back to `./school`.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get default database file path (data_dir/school.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("school.db")
}
