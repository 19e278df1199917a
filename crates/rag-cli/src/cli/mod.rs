use clap::{Parser, ValueEnum};

use rag_config::RagConfig;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ragulator` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ragulator",
    version,
    about = "RAGulator - evaluate LLM chain configurations against a question set"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw (defaults to general.default_format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use the in-memory demo backend instead of the configured one
    #[arg(long, global = true)]
    pub demo: bool,
}

impl Cli {
    /// Extract global flags, filling the output format from config when the
    /// flag is absent.
    #[must_use]
    pub fn global_flags(&self, config: &RagConfig) -> GlobalFlags {
        let format = self.format.unwrap_or_else(|| {
            OutputFormat::from_str(&config.general.default_format, true).unwrap_or_else(|_| {
                tracing::warn!(
                    value = %config.general.default_format,
                    "unknown general.default_format; using json"
                );
                OutputFormat::Json
            })
        });
        GlobalFlags {
            format,
            quiet: self.quiet,
            verbose: self.verbose,
            demo: self.demo,
        }
    }
}
