use anyhow::Context;

use rag_core::payloads::{QuestionCreate, QuestionUpdate};
use rag_store::EvalContext;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionCommands;
use crate::commands::shared::{ensure, open_session, require};
use crate::output::output;

/// Handle `ragulator question`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &EvalContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.questions();
    match action {
        QuestionCommands::List { session } => {
            open_session(ctx, session).await?;
            output(&store.entries().await, flags.format)
        }
        QuestionCommands::Add {
            session,
            text,
            expected,
        } => {
            open_session(ctx, session).await?;
            let mut body = QuestionCreate::new(text.as_str());
            if let Some(expected) = expected {
                body = body.with_expected_answer(expected.as_str());
            }
            let created =
                require(store.create(session, &body).await, store.status(), "adding question")
                    .await?;
            output(&created, flags.format)
        }
        QuestionCommands::Import { session, path } => {
            open_session(ctx, session).await?;
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let created = ctx.import_questions_csv(&file_name, &content).await?;
            let created = require(created, store.status(), "importing questions").await?;
            tracing::info!(count = created.len(), file_name = %file_name, "questions imported");
            output(&created, flags.format)
        }
        QuestionCommands::Update {
            session,
            id,
            text,
            expected,
        } => {
            open_session(ctx, session).await?;
            let body = QuestionUpdate {
                question_text: text.clone(),
                expected_answer: expected.clone(),
            };
            let updated = require(
                store.update(session, id, &body).await,
                store.status(),
                "updating question",
            )
            .await?;
            output(&updated, flags.format)
        }
        QuestionCommands::Delete { session, ids } => {
            open_session(ctx, session).await?;
            let deleted = if let [id] = ids.as_slice() {
                ctx.delete_question(id).await?
            } else {
                ctx.delete_questions(ids).await?
            };
            ensure(deleted, store.status(), "deleting questions").await?;
            output(&serde_json::json!({ "deleted": ids }), flags.format)
        }
        QuestionCommands::Clear { session } => {
            open_session(ctx, session).await?;
            let deleted = ctx.delete_all_questions().await?;
            ensure(deleted, store.status(), "clearing questions").await?;
            output(&store.entries().await, flags.format)
        }
    }
}
