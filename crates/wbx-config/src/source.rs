//! Source knowledge base settings.

use serde::{Deserialize, Serialize};

/// Public Wikidata action API.
pub const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";

fn default_api_url() -> String {
    WIKIDATA_API_URL.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Action API entities are read from.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}
