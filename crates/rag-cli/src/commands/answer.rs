use anyhow::bail;

use rag_store::EvalContext;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnswerCommands;
use crate::commands::shared::{ensure, require};
use crate::output::output;

/// Handle `ragulator answer`.
pub async fn handle(
    action: &AnswerCommands,
    ctx: &EvalContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.answers();
    match action {
        AnswerCommands::List {
            question,
            configuration,
        } => {
            let fetched = match (question, configuration) {
                (Some(question_id), _) => store.fetch_for_question(question_id).await,
                (None, Some(configuration_id)) => {
                    store.fetch_for_configuration(configuration_id).await
                }
                (None, None) => bail!("either --question or --configuration is required"),
            };
            ensure(fetched, store.status(), "listing answers").await?;
            output(&store.answers().await, flags.format)
        }
        AnswerCommands::Score {
            question,
            answer,
            score,
        } => {
            let scored = ctx.score_answer(question, answer, *score).await?;
            let scored = require(scored, store.status(), "scoring answer").await?;
            output(&scored, flags.format)
        }
    }
}
