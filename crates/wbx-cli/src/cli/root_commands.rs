use std::path::PathBuf;

use clap::{Args, Subcommand};
use wbx_core::EntityKind;

use crate::cli::subcommands::AuthCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Copy entities from the source knowledge base into the target Wikibase.
    Copy(CopyArgs),
    /// Create entities in the target Wikibase from CSV rows.
    Create(CreateArgs),
    /// Target credentials.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CopyArgs {
    /// File with one source entity id per line.
    pub id_file: PathBuf,
    /// File with one language code per line.
    pub language_file: PathBuf,
    /// Directory that receives entity_id_mapping.json.
    pub output_dir: PathBuf,
    /// Entity kind: item or property.
    pub kind: EntityKind,
    /// Property on the target linking each copy back to its source id.
    #[arg(long)]
    pub equiv_property: Option<String>,
    /// Source action API URL (overrides source.api_url).
    #[arg(long)]
    pub source_url: Option<String>,
    /// Record failed creations and keep going.
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// CSV with label, description and (for properties) datatype columns.
    pub csv_file: PathBuf,
    /// Language code for labels and descriptions.
    pub language: String,
    /// Entity kind: item or property.
    pub kind: EntityKind,
    /// Record failed creations and keep going.
    #[arg(long)]
    pub continue_on_error: bool,
}
