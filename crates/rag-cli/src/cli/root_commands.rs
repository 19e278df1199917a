use clap::Subcommand;

use crate::cli::subcommands::{
    AnswerCommands, ChainCommands, ConfigCommands, QuestionCommands, SessionCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Evaluation sessions.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Questions of a session.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Generated answers and their scores.
    Answer {
        #[command(subcommand)]
        action: AnswerCommands,
    },
    /// Chains available on the server and selected for a session.
    Chain {
        #[command(subcommand)]
        action: ChainCommands,
    },
    /// Prompt and parameter configurations.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}
