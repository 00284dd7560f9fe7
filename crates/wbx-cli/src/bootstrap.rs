use anyhow::Context;
use wbx_api::{EditToken, Session, WikibaseClient};
use wbx_config::WbxConfig;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<WbxConfig> {
    WbxConfig::load_with_dotenv(flags.config.as_deref()).map_err(anyhow::Error::from)
}

/// Log in to the configured target and fetch an edit token.
pub async fn connect(config: &WbxConfig) -> anyhow::Result<(Session, EditToken)> {
    let credentials = config.credentials.require()?;
    let client = WikibaseClient::new(&config.http)?;

    wbx_api::authenticate(
        client,
        &credentials.endpoint_url,
        &credentials.username,
        &credentials.password,
    )
    .await
    .with_context(|| format!("failed to log in to {}", credentials.endpoint_url))
}
