pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lmis-upload")]
#[command(about = "Prepare LMIS upload files: normalize fields and look up existing facilities")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the ISO-8601 form of a date value
    NormalizeDate { value: String },

    /// Convert each CSV row into a JSON import document using the configured mappings
    Convert {
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        input: PathBuf,
    },

    /// Look up an existing facility by its code
    FindFacility {
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        code: String,
    },
}
