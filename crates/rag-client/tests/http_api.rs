//! `HttpApi` against a mock backend.

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

use rag_client::envelope::NETWORK_ERROR_MESSAGE;
use rag_client::{EvalApi, HttpApi};
use rag_core::Score;
use rag_core::payloads::{AnswerUpdate, ChainSelection, QuestionCreate, SessionCreate};

const NOW: &str = "2024-05-01T12:00:00Z";

fn api(server: &Server) -> HttpApi {
    HttpApi::new(server.url(), None).unwrap()
}

#[tokio::test]
async fn create_session_posts_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/sessions")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "name": "Baseline" })))
        .with_status(200)
        .with_body(
            json!({
                "id": "s1",
                "name": "Baseline",
                "created_at": NOW,
                "last_modified": NOW
            })
            .to_string(),
        )
        .create_async()
        .await;

    let body = SessionCreate {
        name: "Baseline".into(),
        description: None,
    };
    let session = api(&server).create_session(&body).await.into_result().unwrap();

    assert_eq!(session.id, "s1");
    mock.assert_async().await;
}

#[tokio::test]
async fn session_detail_carries_nested_collections() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/sessions/s1")
        .with_status(200)
        .with_body(
            json!({
                "id": "s1",
                "name": "Baseline",
                "created_at": NOW,
                "last_modified": NOW,
                "chains": [],
                "configurations": [],
                "questions": [{
                    "id": "q1",
                    "session_id": "s1",
                    "question_text": "What is the capital of France?",
                    "expected_answer": "Paris",
                    "created_at": NOW,
                    "last_modified": NOW,
                    "answers": [{
                        "id": "a1",
                        "question_id": "q1",
                        "chain_id": "ch1",
                        "configuration_id": "config_1",
                        "generated_answer": "Paris",
                        "score": "4",
                        "created_at": NOW
                    }]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let detail = api(&server).get_session("s1").await.into_result().unwrap();
    let answer = detail.questions[0].answer_for("config_1").unwrap();
    assert_eq!(answer.answer.score, Some(Score::new(4).unwrap()));
}

#[tokio::test]
async fn not_found_detail_is_surfaced() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/sessions/missing")
        .with_status(404)
        .with_body(r#"{"detail": "Session not found"}"#)
        .create_async()
        .await;

    let failure = api(&server)
        .get_session("missing")
        .await
        .into_result()
        .unwrap_err();
    assert_eq!(failure.message, "Session not found");
    assert_eq!(failure.status, Some(404));
}

#[tokio::test]
async fn bulk_question_calls_wrap_their_payloads() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/sessions/s1/questions/bulk")
        .match_body(Matcher::Json(json!({
            "questions": [
                { "question_text": "What is the capital of France?", "expected_answer": "Paris" },
                { "question_text": "Who wrote 'Romeo and Juliet'?" }
            ]
        })))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/sessions/s1/questions/bulk")
        .match_body(Matcher::Json(json!({ "question_ids": ["q1", "q2"] })))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = api(&server);
    let questions = [
        QuestionCreate::new("What is the capital of France?").with_expected_answer("Paris"),
        QuestionCreate::new("Who wrote 'Romeo and Juliet'?"),
    ];
    assert!(client.create_questions_bulk("s1", &questions).await.is_ok());
    let ids = ["q1".to_string(), "q2".to_string()];
    assert!(client.delete_questions_bulk("s1", &ids).await.is_ok());

    create.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn score_update_patches_the_answer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/questions/q1/answers/a1")
        .match_body(Matcher::Json(json!({ "score": 5 })))
        .with_status(200)
        .with_body(
            json!({
                "id": "a1",
                "question_id": "q1",
                "chain_id": "ch1",
                "configuration_id": "config_1",
                "generated_answer": "Paris",
                "score": 5,
                "created_at": NOW,
                "comments": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let body = AnswerUpdate {
        score: Some(Score::new(5).unwrap()),
    };
    let answer = api(&server)
        .update_answer_score("q1", "a1", &body)
        .await
        .into_result()
        .unwrap();
    assert_eq!(answer.answer.score.map(Score::value), Some(5));
    mock.assert_async().await;
}

#[tokio::test]
async fn chain_selection_and_score_endpoints() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/sessions/s1/select-chains")
        .match_body(Matcher::Json(json!({ "file_names": ["simple_chain.py"] })))
        .with_status(200)
        .with_body(
            json!([{
                "id": "ch1",
                "file_name": "simple_chain.py",
                "session_id": "s1",
                "created_at": NOW
            }])
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/configurations/c1/score")
        .with_status(200)
        .with_body("3.5")
        .create_async()
        .await;
    server
        .mock("GET", "/configurations/c2/score")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let client = api(&server);
    let body = ChainSelection {
        file_names: vec!["simple_chain.py".into()],
    };
    let chains = client.select_chains("s1", &body).await.into_result().unwrap();
    assert_eq!(chains[0].id, "ch1");
    assert_eq!(client.configuration_score("c1").await.into_result().unwrap(), Some(3.5));
    assert_eq!(client.configuration_score("c2").await.into_result().unwrap(), None);
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = HttpApi::new(format!("http://127.0.0.1:{port}/v1"), None).unwrap();
    let failure = client.list_sessions().await.into_result().unwrap_err();
    assert_eq!(failure.message, NETWORK_ERROR_MESSAGE);
    assert_eq!(failure.status, None);
}
