//! Foreground window snapshot types.

use serde::{Deserialize, Serialize};

/// Snapshot of an application window, produced fresh on each query and
/// never cached.
///
/// `title` and `url` are only populated when explicitly requested through
/// [`ActiveWindowArgs`], because both can require extra round trips to the
/// OS window server (hundreds of milliseconds in adversarial cases).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppWindowInfo {
    /// Process id of the window's owner.
    pub pid: u32,
    /// Platform window handle, as an opaque integer.
    pub window_id: u64,
    /// Name of the owning application.
    pub app_name: String,
    /// Window title, if requested and available.
    pub title: Option<String>,
    /// Active browser tab URL, if requested and the foreground app is a
    /// known browser. Best effort only.
    pub url: Option<String>,
}

/// Options for the active-window query. Both default off because they are
/// the expensive parts of the lookup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActiveWindowArgs {
    /// Include the window title in the result.
    pub get_window_title: bool,
    /// Attempt to extract the active tab URL when the foreground app is a
    /// known browser.
    pub get_browser_url: bool,
}
