//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is visible under `/host`, which points at the cwd
//! Zellij was started from (usually the user's home directory).

use std::path::PathBuf;

/// Directory for the trace export files.
///
/// Resolves to `~/.local/share/zellij/campaign-feed` on the host when Zellij
/// runs from the home directory.
///
/// # Examples
///
/// ```
/// use campaign_feed::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("campaign-feed"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("campaign-feed")
}

/// Maps `~` prefixed paths to their sandbox location under `/host`.
///
/// Used for the `theme_file` option, which users write relative to home.
///
/// # Examples
///
/// ```
/// use campaign_feed::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/feed.toml"), "/host/themes/feed.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/feed.toml"), "/etc/feed.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
