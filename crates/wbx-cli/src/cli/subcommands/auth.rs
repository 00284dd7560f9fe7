use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in to the target and fetch an edit token without editing.
    Check,
}
