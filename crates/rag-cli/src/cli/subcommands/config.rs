use clap::Subcommand;

/// Configuration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// List the session's configurations.
    List {
        #[arg(long)]
        session: String,
    },
    /// Show one configuration.
    Show {
        #[arg(long)]
        session: String,
        /// Configuration ID.
        id: String,
    },
    /// Create a configuration.
    Create {
        #[arg(long)]
        session: String,
        /// Prompt template entry as key=value (repeatable).
        #[arg(long = "prompt")]
        prompt: Vec<String>,
        /// LLM parameter as key=value (repeatable).
        #[arg(long = "param")]
        params: Vec<String>,
    },
    /// Delete a configuration.
    Delete {
        #[arg(long)]
        session: String,
        /// Configuration ID.
        id: String,
    },
    /// Average score of a configuration's answers.
    Score {
        /// Configuration ID.
        id: String,
    },
}
