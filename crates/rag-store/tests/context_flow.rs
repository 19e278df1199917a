//! End-to-end flows through `EvalContext` against the in-memory backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use rag_client::demo::DEMO_SESSION_ID;
use rag_client::{ClientError, DemoApi, EvalApi};
use rag_core::CoreError;
use rag_core::payloads::SessionCreate;
use rag_store::{Completeness, EvalContext, StoreError};

fn session_named(name: &str) -> SessionCreate {
    SessionCreate {
        name: name.into(),
        description: None,
    }
}

async fn opened() -> EvalContext {
    let ctx = EvalContext::new(Arc::new(DemoApi::seeded()));
    ctx.open_session(DEMO_SESSION_ID).await.unwrap();
    ctx
}

#[tokio::test]
async fn open_session_seeds_session_scoped_stores() {
    let ctx = opened().await;
    assert_eq!(ctx.questions().detailed_count().await, 2);
    assert_eq!(ctx.chains().chains().await.len(), 1);
    assert_eq!(ctx.configurations().configurations().await.len(), 2);
    assert_eq!(ctx.active_session_id().await.as_deref(), Some(DEMO_SESSION_ID));
}

#[tokio::test]
async fn switching_sessions_resets_state() {
    let ctx = opened().await;
    ctx.answers().fetch_for_question("q1").await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();

    let other = ctx.create_session(&session_named("Other")).await.unwrap();
    ctx.open_session(DEMO_SESSION_ID).await.unwrap();
    ctx.select_answer("q1", "cfg-1").await.unwrap();

    ctx.open_session(&other.id).await.unwrap();
    assert!(ctx.questions().is_empty().await);
    assert!(ctx.answers().answers().await.is_empty());
    assert!(ctx.chains().chains().await.is_empty());
    assert_eq!(ctx.selection().active().await, None);
}

#[tokio::test]
async fn creating_a_session_drops_the_previous_sessions_state() {
    let ctx = opened().await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();

    let created = ctx.create_session(&session_named("Fresh run")).await.unwrap();
    assert_eq!(ctx.active_session_id().await, Some(created.id));
    assert!(ctx.questions().is_empty().await);
    assert!(ctx.answers().answers().await.is_empty());
    assert!(ctx.configurations().configurations().await.is_empty());
    assert_eq!(ctx.selection().active().await, None);

    // Question operations now target the new, empty session.
    assert!(!ctx.delete_question("q1").await.unwrap());
}

#[tokio::test]
async fn deleting_the_active_session_drops_its_state() {
    let ctx = opened().await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();

    assert!(ctx.delete_session(DEMO_SESSION_ID).await);
    assert_eq!(ctx.active_session_id().await, None);
    assert!(ctx.questions().is_empty().await);
    assert!(ctx.answers().answers().await.is_empty());
    assert!(ctx.chains().chains().await.is_empty());
    assert_eq!(ctx.selection().active().await, None);
}

#[tokio::test]
async fn deleting_another_session_keeps_the_active_one() {
    let ctx = opened().await;
    let scratch = ctx.create_session(&session_named("Scratch")).await.unwrap();
    ctx.open_session(DEMO_SESSION_ID).await.unwrap();
    ctx.select_answer("q2", "cfg-2").await.unwrap();

    assert!(ctx.delete_session(&scratch.id).await);
    assert_eq!(ctx.active_session_id().await.as_deref(), Some(DEMO_SESSION_ID));
    assert_eq!(ctx.questions().len().await, 2);
    assert!(ctx.selection().active().await.is_some());
}

#[tokio::test]
async fn failed_session_delete_keeps_state() {
    let ctx = opened().await;
    assert!(!ctx.delete_session("missing").await);
    assert_eq!(ctx.questions().len().await, 2);
    assert_eq!(
        ctx.sessions().status().error().await.as_deref(),
        Some("Session not found")
    );
}

#[tokio::test]
async fn selected_answer_is_always_in_the_answer_collection() {
    let ctx = opened().await;
    let selected = ctx.select_answer("q1", "cfg-1").await.unwrap();
    assert_eq!(ctx.answers().find("q1-cfg-1").await, Some(selected));

    // A fetch for another scope drops the answer and the selection together.
    ctx.answers().fetch_for_question("q2").await;
    assert_eq!(ctx.answers().find("q1-cfg-1").await, None);
    assert_eq!(ctx.selection().active().await, None);

    ctx.select_answer("q1", "cfg-2").await.unwrap();
    let active = ctx.selection().active().await.unwrap();
    assert!(ctx.answers().find(active.id()).await.is_some());
}

#[tokio::test]
async fn reopening_the_same_session_keeps_local_state() {
    let ctx = opened().await;
    ctx.select_answer("q2", "cfg-2").await.unwrap();
    ctx.open_session(DEMO_SESSION_ID).await.unwrap();
    assert!(ctx.selection().active().await.is_some());
}

#[tokio::test]
async fn score_is_consistent_across_views() {
    let ctx = opened().await;
    ctx.answers().fetch_for_question("q1").await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();

    let updated = ctx.score_answer("q1", "q1-cfg-1", 3).await.unwrap().unwrap();
    let score = updated.answer.score;

    assert_eq!(ctx.answers().find("q1-cfg-1").await.unwrap().answer.score, score);
    assert_eq!(ctx.selection().active().await.unwrap().answer.score, score);
    assert_eq!(
        ctx.questions().answer_for("q1", "cfg-1").await.unwrap().answer.score,
        score
    );
}

#[tokio::test]
async fn out_of_range_score_is_rejected_locally() {
    let ctx = opened().await;
    let err = ctx.score_answer("q1", "q1-cfg-1", 6).await.unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
    assert_eq!(ctx.answers().status().error().await, None);
}

#[tokio::test]
async fn comments_propagate_to_both_stores() {
    let ctx = opened().await;
    ctx.answers().fetch_for_question("q2").await;
    ctx.select_answer("q2", "cfg-1").await.unwrap();

    ctx.add_comment("  attribution is right ").await.unwrap();
    ctx.add_comment("").await;
    let held = ctx.answers().find("q2-cfg-1").await.unwrap();
    assert_eq!(held.comments.len(), 1);
    assert_eq!(held.comments[0].comment_text, "attribution is right");
    let nested = ctx.questions().answer_for("q2", "cfg-1").await.unwrap();
    assert_eq!(nested.comments, held.comments);

    ctx.delete_comment(0).await.unwrap();
    assert!(ctx.questions().answer_for("q2", "cfg-1").await.unwrap().comments.is_empty());
}

#[tokio::test]
async fn selecting_a_missing_pair_clears_selection() {
    let ctx = opened().await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();
    assert_eq!(ctx.select_answer("q1", "cfgA").await, None);
    assert_eq!(ctx.selection().active().await, None);
}

#[tokio::test]
async fn deleting_the_selected_question_clears_selection() {
    let ctx = opened().await;
    ctx.answers().fetch_for_configuration("cfg-1").await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();

    assert!(ctx.delete_questions(&["q2".to_string()]).await.unwrap());
    assert!(ctx.selection().active().await.is_some());
    assert_eq!(ctx.answers().find("q2-cfg-1").await, None);

    assert!(ctx.delete_question("q1").await.unwrap());
    assert_eq!(ctx.selection().active().await, None);
    assert!(ctx.answers().answers().await.is_empty());
    assert!(ctx.questions().is_empty().await);
}

#[tokio::test]
async fn csv_import_creates_basic_questions() {
    let ctx = opened().await;
    let csv = "Question,Expected Answer\nCapital of France?,Paris\n  ,x\n";
    let created = ctx
        .import_questions_csv("questions.csv", csv)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.len(), 1);

    let entries = ctx.questions().entries().await;
    let last = entries.last().unwrap();
    assert_eq!(last.completeness, Completeness::Basic);
    assert_eq!(last.question.question.question_text, "Capital of France?");
    assert_eq!(last.question.question.expected_answer.as_deref(), Some("Paris"));
}

#[tokio::test]
async fn csv_import_validation_happens_before_any_request() {
    let ctx = opened().await;
    let err = ctx
        .import_questions_csv("questions.txt", "Question,Expected Answer\n")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Import(ClientError::InvalidFileType(_))));

    let err = ctx
        .import_questions_csv("questions.csv", "Prompt\nx\n")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Import(ClientError::MissingHeaders(_))));
    assert_eq!(ctx.questions().len().await, 2);
}

#[tokio::test]
async fn question_operations_need_an_open_session() {
    let ctx = EvalContext::new(Arc::new(DemoApi::seeded()));
    assert!(matches!(
        ctx.delete_question("q1").await,
        Err(StoreError::NoActiveSession)
    ));
    assert!(matches!(
        ctx.import_questions_csv("q.csv", "Question,Expected Answer\n").await,
        Err(StoreError::NoActiveSession)
    ));
}

#[tokio::test]
async fn failed_calls_leave_the_collection_and_record_the_message() {
    let api = Arc::new(DemoApi::seeded());
    let ctx = EvalContext::new(Arc::clone(&api) as Arc<dyn EvalApi>);
    ctx.open_session(DEMO_SESSION_ID).await.unwrap();

    // Remove the session behind the store's back.
    api.delete_session(DEMO_SESSION_ID).await.into_result().unwrap();

    assert!(!ctx.questions().fetch_all(DEMO_SESSION_ID).await);
    assert_eq!(ctx.questions().len().await, 2);
    assert_eq!(
        ctx.questions().status().error().await.as_deref(),
        Some("Session not found")
    );
    assert!(!ctx.questions().status().is_loading());
}

#[tokio::test]
async fn reset_clears_recorded_errors() {
    let ctx = opened().await;
    assert!(!ctx.questions().fetch_all("missing").await);
    assert!(!ctx.configurations().fetch_score("missing").await);
    assert!(ctx.questions().status().error().await.is_some());

    ctx.reset().await;
    assert_eq!(ctx.questions().status().error().await, None);
    assert_eq!(ctx.configurations().status().error().await, None);
}
