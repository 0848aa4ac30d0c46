use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "contextflow";

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `<config dir>/contextflow`, or `./contextflow` when the platform has no
/// configuration directory.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde(" /tmp/prefs.json "), PathBuf::from("/tmp/prefs.json"));
        assert_eq!(expand_tilde("relative/file"), PathBuf::from("relative/file"));
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
    }

    #[test]
    fn config_dir_ends_with_app_name() {
        assert!(app_config_dir().ends_with(APP_DIR_NAME));
    }
}
