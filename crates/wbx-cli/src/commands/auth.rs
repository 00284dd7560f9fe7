use serde::Serialize;
use wbx_config::WbxConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuthCheckResponse {
    authenticated: bool,
    endpoint_url: String,
    username: String,
}

/// Handle `wbx auth <subcommand>`.
pub async fn handle(action: &AuthCommands, flags: &GlobalFlags, config: &WbxConfig) -> anyhow::Result<()> {
    match action {
        AuthCommands::Check => {
            let response = check(config).await?;
            output(&response, flags.format)
        }
    }
}

async fn check(config: &WbxConfig) -> anyhow::Result<AuthCheckResponse> {
    let (session, _token) = bootstrap::connect(config).await?;
    Ok(AuthCheckResponse {
        authenticated: true,
        endpoint_url: session.endpoint_url().to_string(),
        username: config.credentials.username.clone(),
    })
}
