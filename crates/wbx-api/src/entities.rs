//! Entity reads (`wbgetentities`) and creation (`wbeditentity`).

use std::collections::BTreeMap;

use serde::Deserialize;
use wbx_core::{EntityKind, EntityRecord};

use crate::auth::{EditToken, Session};
use crate::http::require_str;
use crate::{ApiError, WikibaseClient};

/// One entry of a `wbgetentities` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntity {
    #[serde(default)]
    pub id: Option<String>,

    /// Present (as an empty string) when the requested entity does not exist.
    #[serde(default)]
    missing: Option<serde_json::Value>,

    #[serde(flatten)]
    pub record: EntityRecord,
}

impl SourceEntity {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.missing.is_some()
    }
}

/// Entities keyed by the identifiers they were requested with.
pub type EntityBatch = BTreeMap<String, SourceEntity>;

/// Parameters shared by every creation request.
#[derive(Debug, Clone)]
pub struct EditOptions {
    pub summary: String,
    pub bot: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            summary: "Bot edit!".to_string(),
            bot: true,
        }
    }
}

impl From<&wbx_config::TransferConfig> for EditOptions {
    fn from(config: &wbx_config::TransferConfig) -> Self {
        Self {
            summary: config.summary.clone(),
            bot: config.bot,
        }
    }
}

impl WikibaseClient {
    /// Fetch several entities with one `wbgetentities` call.
    ///
    /// `languages` restricts the returned terms; an empty slice fetches all
    /// languages.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails, the service reports an error
    /// (e.g. `no-such-entity`), or the response has no `entities` object.
    pub async fn get_entities(
        &self,
        api_url: &str,
        ids: &[String],
        languages: &[String],
    ) -> Result<EntityBatch, ApiError> {
        let ids_param = ids.join("|");
        let languages_param = languages.join("|");
        let mut params = vec![
            ("action", "wbgetentities"),
            ("format", "json"),
            ("ids", ids_param.as_str()),
        ];
        if !languages.is_empty() {
            params.push(("languages", languages_param.as_str()));
        }

        let mut body = self.get(api_url, &params).await?;
        let entities = body
            .get_mut("entities")
            .map(serde_json::Value::take)
            .ok_or_else(|| ApiError::MissingField("entities".to_string()))?;
        Ok(serde_json::from_value(entities)?)
    }
}

impl Session {
    /// Create a new entity from `record` and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Service`] when the target refuses the edit
    /// (`failed-save`, `badtoken`, `permissiondenied`, ...), or
    /// [`ApiError::MissingField`] if the response lacks `entity.id`.
    pub async fn create_entity(
        &self,
        token: &EditToken,
        kind: EntityKind,
        record: &EntityRecord,
        options: &EditOptions,
    ) -> Result<String, ApiError> {
        let data = serde_json::to_string(record)?;
        let mut form = vec![
            ("action", "wbeditentity"),
            ("new", kind.as_str()),
            ("token", token.as_str()),
            ("format", "json"),
            ("summary", options.summary.as_str()),
            ("data", data.as_str()),
        ];
        if options.bot {
            form.push(("bot", "1"));
        }

        let body = self.client().post(self.endpoint_url(), &form).await?;
        Ok(require_str(&body, "entity.id")?.to_string())
    }
}
