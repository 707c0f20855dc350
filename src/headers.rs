//! Header names and status codes owned by the HTMX client library.

// Request headers
pub const HX_BOOSTED: &str = "HX-Boosted";
pub const HX_CURRENT_URL: &str = "HX-Current-URL";
pub const HX_HISTORY_RESTORE_REQUEST: &str = "HX-History-Restore-Request";
pub const HX_PROMPT: &str = "HX-Prompt";
pub const HX_REQUEST: &str = "HX-Request";
pub const HX_TARGET: &str = "HX-Target";
pub const HX_TRIGGER_NAME: &str = "HX-Trigger-Name";
/// Sent by the client as the id of the triggering element, and by the server
/// as the events to fire.
pub const HX_TRIGGER: &str = "HX-Trigger";

// Response headers
pub const HX_LOCATION: &str = "HX-Location";
pub const HX_PUSH_URL: &str = "HX-Push-Url";
pub const HX_REDIRECT: &str = "HX-Redirect";
pub const HX_REFRESH: &str = "HX-Refresh";
pub const HX_REPLACE_URL: &str = "HX-Replace-Url";
pub const HX_RESWAP: &str = "HX-Reswap";
pub const HX_RETARGET: &str = "HX-Retarget";
pub const HX_RESELECT: &str = "HX-Reselect";
pub const HX_TRIGGER_AFTER_SETTLE: &str = "HX-Trigger-After-Settle";
pub const HX_TRIGGER_AFTER_SWAP: &str = "HX-Trigger-After-Swap";

/// Status code that tells a polling element to stop polling.
pub const STATUS_STOP_POLLING: u16 = 286;
