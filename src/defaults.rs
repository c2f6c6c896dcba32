//! Built-in kind names, splash chrome constants, and timing defaults.

use std::time::Duration;

/// Kind name served by the default script loader.
pub const SCRIPTS_KIND: &str = "scripts";
/// Kind name served by the default stylesheet loader.
pub const STYLESHEETS_KIND: &str = "stylesheets";

/// How long the fade animation runs; teardown waits this long after the
/// opacities are zeroed.
pub const FADE_OUT_DELAY: Duration = Duration::from_millis(1000);

/// Bar color applied when a group fails to load.
pub const ERROR_BAR_COLOR: &str = "#ff4a4a";

/// Id of the host page's status text element, if present.
pub const STATUS_ELEMENT_ID: &str = "pos";
/// Class added to the status element on load failure.
pub const STATUS_FAIL_CLASS: &str = "loadFail";

// Placeholder tokens substituted by the packaging step. The runtime never
// interprets them.
pub const STYLE_TOKEN: &str = "!!!STYLE!!!";
pub const LOGO_TOKEN: &str = "!!!LOGO!!!";
pub const LOGO_DATA_PREFIX: &str = "data:image/png;base64,";

// Class names for the splash chrome.
pub const UI_CLASS: &str = "ui";
pub const SCREEN_CLASS: &str = "loadScreen";
pub const BACKGROUND_CLASS: &str = "loadScreenBg";
pub const LOGO_CLASS: &str = "logo";
pub const PROGRESS_BAR_CLASS: &str = "progressBar";
