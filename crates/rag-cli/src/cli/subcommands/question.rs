use std::path::PathBuf;

use clap::Subcommand;

/// Question commands. All operate on one session.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// List the session's questions.
    List {
        #[arg(long)]
        session: String,
    },
    /// Add one question.
    Add {
        #[arg(long)]
        session: String,
        /// Question text.
        text: String,
        /// Expected answer.
        #[arg(long)]
        expected: Option<String>,
    },
    /// Import questions from a CSV file with `Question` and `Expected Answer` columns.
    Import {
        #[arg(long)]
        session: String,
        /// Path to the CSV file.
        path: PathBuf,
    },
    /// Edit a question.
    Update {
        #[arg(long)]
        session: String,
        /// Question ID.
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        expected: Option<String>,
    },
    /// Delete one or more questions.
    Delete {
        #[arg(long)]
        session: String,
        /// Question IDs.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete every question of the session.
    Clear {
        #[arg(long)]
        session: String,
    },
}
