use rag_core::payloads::{SessionCreate, SessionUpdate};
use rag_store::EvalContext;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::commands::shared::{ensure, open_session, require};
use crate::output::output;

/// Handle `ragulator session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &EvalContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.sessions();
    match action {
        SessionCommands::List => {
            ensure(store.fetch_all().await, store.status(), "listing sessions").await?;
            output(&store.sessions().await, flags.format)
        }
        SessionCommands::Show { id } => {
            let detail = open_session(ctx, id).await?;
            output(&detail, flags.format)
        }
        SessionCommands::Create { name, description } => {
            let body = SessionCreate {
                name: name.clone(),
                description: description.clone(),
            };
            let created =
                require(ctx.create_session(&body).await, store.status(), "creating session")
                    .await?;
            output(&created, flags.format)
        }
        SessionCommands::Update {
            id,
            name,
            description,
        } => {
            let body = SessionUpdate {
                name: name.clone(),
                description: description.clone(),
            };
            let updated =
                require(store.update(id, &body).await, store.status(), "updating session").await?;
            output(&updated, flags.format)
        }
        SessionCommands::Delete { id } => {
            ensure(ctx.delete_session(id).await, store.status(), "deleting session").await?;
            tracing::info!(session_id = %id, "session deleted");
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
