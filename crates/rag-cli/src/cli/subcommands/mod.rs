mod answer;
mod chain;
mod config;
mod question;
mod session;

pub use answer::AnswerCommands;
pub use chain::ChainCommands;
pub use config::ConfigCommands;
pub use question::QuestionCommands;
pub use session::SessionCommands;
