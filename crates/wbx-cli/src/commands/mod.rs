mod auth;
mod copy;
mod create;
mod shared;

use wbx_config::WbxConfig;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: &Commands, flags: &GlobalFlags, config: &WbxConfig) -> anyhow::Result<()> {
    match command {
        Commands::Copy(args) => copy::handle(args, flags, config).await,
        Commands::Create(args) => create::handle(args, flags, config).await,
        Commands::Auth { action } => auth::handle(action, flags, config).await,
    }
}
