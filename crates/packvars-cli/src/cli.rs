//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// packvars - Inspect and regenerate pack variables
#[derive(Parser, Debug)]
#[command(name = "packvars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge override files and print them as one canonical override file
    ///
    /// Later files override earlier ones variable by variable.
    ///
    /// Examples:
    ///   packvars varfile vars.toml
    ///   packvars varfile base.toml prod.toml -o merged.toml
    Varfile {
        /// Override files to read
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the template context for a pack as JSON
    Context {
        /// Pack manifest (pack.toml)
        #[arg(short, long)]
        pack: PathBuf,

        /// Override files with variable values
        #[arg(long = "vars")]
        vars: Vec<PathBuf>,
    },

    /// Print the flat legacy template map as JSON
    Flatten {
        /// Legacy JSON variables file
        #[arg(long, conflicts_with = "vars")]
        legacy: Option<PathBuf>,

        /// Override files with variable values
        #[arg(long = "vars")]
        vars: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_varfile() {
        let cli = Cli::parse_from(["packvars", "varfile", "a.toml", "b.toml"]);
        assert!(!cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Varfile {
                files: vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")],
                output: None,
            }
        );
    }

    #[test]
    fn test_parse_context_with_vars() {
        let cli = Cli::parse_from([
            "packvars", "-v", "context", "--pack", "pack.toml", "--vars", "a.toml", "--vars",
            "b.toml",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Context { pack, vars } => {
                assert_eq!(pack, PathBuf::from("pack.toml"));
                assert_eq!(vars.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flatten_legacy_conflicts_with_vars() {
        let result = Cli::try_parse_from([
            "packvars", "flatten", "--legacy", "vars.json", "--vars", "vars.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_varfile_requires_files() {
        assert!(Cli::try_parse_from(["packvars", "varfile"]).is_err());
    }
}
