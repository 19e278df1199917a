use rag_store::EvalContext;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &EvalContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Question { action } => commands::question::handle(&action, ctx, flags).await,
        Commands::Answer { action } => commands::answer::handle(&action, ctx, flags).await,
        Commands::Chain { action } => commands::chain::handle(&action, ctx, flags).await,
        Commands::Config { action } => commands::config::handle(&action, ctx, flags).await,
    }
}
