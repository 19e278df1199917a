use clap::Subcommand;

/// Session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// List sessions.
    List,
    /// Show one session with its questions, chains and configurations.
    Show {
        /// Session ID.
        id: String,
    },
    /// Create a session.
    Create {
        /// Session name.
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename or describe a session.
    Update {
        /// Session ID.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a session and everything in it.
    Delete {
        /// Session ID.
        id: String,
    },
}
