//! Path helpers for BinSmart's data and configuration directories.
//!
//! Base directories come from the platform conventions via `dirs`: the XDG
//! variables on Linux, `~/Library/Application Support` on macOS, and the
//! roaming app data folder on Windows. Without a platform directory the home
//! directory is used, and without either the system temporary directory, so
//! logging and previews still work.

use std::path::PathBuf;

const APP_DIR: &str = "binsmart";

/// Returns the data directory holding the log file and image previews.
///
/// # Examples
///
/// ```
/// let data_dir = binsmart::infrastructure::get_data_dir();
/// assert!(data_dir.ends_with("binsmart"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    base_dir(dirs::data_dir()).join(APP_DIR)
}

/// Returns the directory searched for `config.toml`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    base_dir(dirs::config_dir()).join(APP_DIR)
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or any path when the home directory is unknown, are
/// returned as-is.
///
/// # Examples
///
/// ```
/// use binsmart::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn base_dir(platform: Option<PathBuf>) -> PathBuf {
    platform
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_and_config_dirs_are_app_scoped() {
        assert!(get_data_dir().ends_with(APP_DIR));
        assert!(default_config_file().ends_with("binsmart/config.toml"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/photo.jpg"), home.join("photo.jpg"));
        }
    }

    #[test]
    fn missing_platform_dir_falls_back() {
        let fallback = base_dir(None);
        assert_eq!(
            fallback,
            dirs::home_dir().unwrap_or_else(std::env::temp_dir)
        );
        assert_eq!(base_dir(Some(PathBuf::from("/srv/data"))), PathBuf::from("/srv/data"));
    }

    #[test]
    fn non_tilde_paths_are_untouched() {
        assert_eq!(expand_tilde("relative/photo.jpg"), PathBuf::from("relative/photo.jpg"));
        assert_eq!(expand_tilde("/tmp/photo.jpg"), PathBuf::from("/tmp/photo.jpg"));
    }
}
