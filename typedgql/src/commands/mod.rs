mod check;
mod generate;
mod watch;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::Result;
use generate::GenerateCommand;
use typedgql_config::Config;
use watch::WatchCommand;

/// Extension trait for exiting on engine/config errors with pretty
/// formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for typedgql_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for typedgql_engine::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Options shared by every subcommand: the config file plus per-invocation
/// overrides for its most common fields.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to typedgql.toml (defaults to ./typedgql.toml)
    #[arg(short, long, default_value = "typedgql.toml")]
    pub config: PathBuf,

    /// Schema file path (overrides typedgql.toml)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Patterns selecting operation files (overrides typedgql.toml)
    #[arg(long)]
    pub include: Vec<String>,

    /// Patterns for files to skip (overrides typedgql.toml)
    #[arg(long)]
    pub exclude: Vec<String>,
}

impl ConfigArgs {
    /// The config file backing [`ConfigArgs::load`], when one exists.
    pub fn source(&self) -> Option<&Path> {
        self.config.exists().then(|| self.config.as_path())
    }

    /// Resolve configuration: the file when present, defaults otherwise,
    /// with CLI flags layered on top. A missing file is only an error when
    /// its path was given explicitly.
    pub fn load(&self) -> Config {
        let mut config = if self.config.exists() || self.config != PathBuf::from("typedgql.toml") {
            Config::from_file(&self.config).unwrap_or_exit()
        } else {
            Config::default()
        };

        if let Some(schema) = &self.schema {
            config.schema_path = schema.clone();
        }
        if !self.include.is_empty() {
            config.include = self.include.clone();
        }
        if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }
        config
    }
}

#[derive(Parser)]
#[command(name = "typedgql")]
#[command(version)]
#[command(about = "Generate TypeScript declarations for GraphQL schema and operation files")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Watch(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write declaration artifacts for the schema and every operation file
    Generate(GenerateCommand),

    /// Validate typedgql.toml and the schema without writing artifacts
    Check(CheckCommand),

    /// Regenerate artifacts as schema and operation files change
    Watch(WatchCommand),
}
