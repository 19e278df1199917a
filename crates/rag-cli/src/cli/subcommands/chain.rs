use clap::Subcommand;

/// Chain commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChainCommands {
    /// List chain files the server offers.
    Available,
    /// Attach chain files to a session.
    Select {
        #[arg(long)]
        session: String,
        /// Chain file names.
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// List the session's chains.
    List {
        #[arg(long)]
        session: String,
    },
    /// Remove a chain from the session.
    Delete {
        #[arg(long)]
        session: String,
        /// Chain ID.
        id: String,
    },
}
