use clap::Subcommand;

/// Answer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AnswerCommands {
    /// List answers for a question or for a configuration.
    List {
        #[arg(long, conflicts_with = "configuration", required_unless_present = "configuration")]
        question: Option<String>,
        #[arg(long)]
        configuration: Option<String>,
    },
    /// Score an answer (0-5).
    Score {
        /// Question ID.
        question: String,
        /// Answer ID.
        answer: String,
        /// Score from 0 to 5.
        score: u8,
    },
}
