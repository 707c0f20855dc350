use serde::{Deserialize, Serialize};

/// How a framework integration writes a built response.
///
/// Some hosts set the status themselves later in the response lifecycle and
/// complain about a second write; turn `write_status` off for those.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterSettings {
    pub write_status: bool,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self { write_status: true }
    }
}
