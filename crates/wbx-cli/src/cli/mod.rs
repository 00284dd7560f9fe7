use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `wbx` binary.
#[derive(Debug, Parser)]
#[command(name = "wbx", version, about = "Copy and create Wikibase entities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw, text
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config merged above the project file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};
    use wbx_core::EntityKind;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::AuthCommands;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn copy_parses_positionals_and_options() {
        let cli = Cli::try_parse_from([
            "wbx",
            "copy",
            "ids.txt",
            "langs.txt",
            "out",
            "property",
            "--equiv-property",
            "P1",
            "--continue-on-error",
        ])
        .expect("cli should parse");

        let Commands::Copy(args) = cli.command else {
            panic!("expected copy");
        };
        assert_eq!(args.id_file, Path::new("ids.txt"));
        assert_eq!(args.output_dir, Path::new("out"));
        assert_eq!(args.kind, EntityKind::Property);
        assert_eq!(args.equiv_property.as_deref(), Some("P1"));
        assert!(args.source_url.is_none());
        assert!(args.continue_on_error);
    }

    #[test]
    fn create_parses_positionals() {
        let cli = Cli::try_parse_from(["wbx", "create", "rows.csv", "fr", "item"])
            .expect("cli should parse");

        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.language, "fr");
        assert_eq!(args.kind, EntityKind::Item);
        assert!(!args.continue_on_error);
    }

    #[test]
    fn unknown_entity_kind_is_rejected() {
        let parsed = Cli::try_parse_from(["wbx", "create", "rows.csv", "en", "lexeme"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wbx", "auth", "check", "--format", "text", "--quiet", "--config", "extra.toml",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Check
            }
        ));
        let flags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some(Path::new("extra.toml")));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["wbx", "--format", "xml", "auth", "check"]);
        assert!(parsed.is_err());
    }
}
