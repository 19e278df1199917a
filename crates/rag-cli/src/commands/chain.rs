use rag_store::EvalContext;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChainCommands;
use crate::commands::shared::{ensure, require};
use crate::output::output;

/// Handle `ragulator chain`.
pub async fn handle(
    action: &ChainCommands,
    ctx: &EvalContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.chains();
    match action {
        ChainCommands::Available => {
            ensure(store.fetch_available().await, store.status(), "listing chain files").await?;
            output(&store.available().await, flags.format)
        }
        ChainCommands::Select { session, files } => {
            let selected = require(
                store.select(session, files).await,
                store.status(),
                "selecting chains",
            )
            .await?;
            output(&selected, flags.format)
        }
        ChainCommands::List { session } => {
            ensure(store.fetch_all(session).await, store.status(), "listing chains").await?;
            output(&store.chains().await, flags.format)
        }
        ChainCommands::Delete { session, id } => {
            ensure(store.delete(session, id).await, store.status(), "deleting chain").await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
