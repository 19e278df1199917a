use rag_core::payloads::ConfigurationCreate;
use rag_store::EvalContext;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::commands::shared::{ensure, parse_params, require};
use crate::output::output;

/// Handle `ragulator config`.
pub async fn handle(
    action: &ConfigCommands,
    ctx: &EvalContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.configurations();
    match action {
        ConfigCommands::List { session } => {
            ensure(
                store.fetch_all(session).await,
                store.status(),
                "listing configurations",
            )
            .await?;
            output(&store.configurations().await, flags.format)
        }
        ConfigCommands::Show { session, id } => {
            let configuration = require(
                store.fetch_one(session, id).await,
                store.status(),
                "loading configuration",
            )
            .await?;
            output(&configuration, flags.format)
        }
        ConfigCommands::Create {
            session,
            prompt,
            params,
        } => {
            let body = ConfigurationCreate {
                prompt_template: parse_params(prompt)?,
                llm_parameters: parse_params(params)?,
            };
            let created = require(
                store.create(session, &body).await,
                store.status(),
                "creating configuration",
            )
            .await?;
            output(&created, flags.format)
        }
        ConfigCommands::Delete { session, id } => {
            ensure(
                store.delete(session, id).await,
                store.status(),
                "deleting configuration",
            )
            .await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
        ConfigCommands::Score { id } => {
            ensure(store.fetch_score(id).await, store.status(), "scoring configuration").await?;
            output(
                &serde_json::json!({ "configuration_id": id, "score": store.score(id).await }),
                flags.format,
            )
        }
    }
}
