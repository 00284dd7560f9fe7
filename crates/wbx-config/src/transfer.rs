//! Entity creation settings.

use serde::{Deserialize, Serialize};

fn default_summary() -> String {
    "Bot edit!".to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferConfig {
    /// Edit summary attached to every created entity.
    #[serde(default = "default_summary")]
    pub summary: String,

    /// Flag edits as bot edits.
    #[serde(default = "default_true")]
    pub bot: bool,

    /// Abort the remaining batch on the first failed creation. When false,
    /// failures are recorded and the batch continues.
    #[serde(default = "default_true")]
    pub stop_on_error: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            summary: default_summary(),
            bot: true,
            stop_on_error: true,
        }
    }
}
