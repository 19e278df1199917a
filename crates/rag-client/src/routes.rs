//! Resource paths of the evaluation backend.
//!
//! Identifiers are percent-encoded so opaque tokens never alter the path.

use urlencoding::encode;

pub fn sessions() -> String {
    String::from("/sessions")
}

pub fn session(session_id: &str) -> String {
    format!("/sessions/{}", encode(session_id))
}

pub fn questions(session_id: &str) -> String {
    format!("{}/questions", session(session_id))
}

pub fn questions_bulk(session_id: &str) -> String {
    format!("{}/questions/bulk", session(session_id))
}

pub fn question(session_id: &str, question_id: &str) -> String {
    format!("{}/questions/{}", session(session_id), encode(question_id))
}

pub fn question_answers(question_id: &str) -> String {
    format!("/questions/{}/answers", encode(question_id))
}

pub fn question_answer(question_id: &str, answer_id: &str) -> String {
    format!("{}/{}", question_answers(question_id), encode(answer_id))
}

pub fn configuration_answers(configuration_id: &str) -> String {
    format!("/configurations/{}/answers", encode(configuration_id))
}

pub fn configuration_score(configuration_id: &str) -> String {
    format!("/configurations/{}/score", encode(configuration_id))
}

pub fn available_chains() -> String {
    String::from("/available-chains")
}

pub fn select_chains(session_id: &str) -> String {
    format!("{}/select-chains", session(session_id))
}

pub fn chains(session_id: &str) -> String {
    format!("{}/chains", session(session_id))
}

pub fn chain(session_id: &str, chain_id: &str) -> String {
    format!("{}/chains/{}", session(session_id), encode(chain_id))
}

pub fn configurations(session_id: &str) -> String {
    format!("{}/configurations", session(session_id))
}

pub fn configuration(session_id: &str, configuration_id: &str) -> String {
    format!(
        "{}/configurations/{}",
        session(session_id),
        encode(configuration_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(sessions(), "/sessions")]
    #[case(session("s1"), "/sessions/s1")]
    #[case(questions("s1"), "/sessions/s1/questions")]
    #[case(questions_bulk("s1"), "/sessions/s1/questions/bulk")]
    #[case(question("s1", "q1"), "/sessions/s1/questions/q1")]
    #[case(question_answers("q1"), "/questions/q1/answers")]
    #[case(question_answer("q1", "a1"), "/questions/q1/answers/a1")]
    #[case(configuration_answers("c1"), "/configurations/c1/answers")]
    #[case(configuration_score("c1"), "/configurations/c1/score")]
    #[case(available_chains(), "/available-chains")]
    #[case(select_chains("s1"), "/sessions/s1/select-chains")]
    #[case(chains("s1"), "/sessions/s1/chains")]
    #[case(chain("s1", "ch1"), "/sessions/s1/chains/ch1")]
    #[case(configurations("s1"), "/sessions/s1/configurations")]
    #[case(configuration("s1", "c1"), "/sessions/s1/configurations/c1")]
    fn builds_expected_paths(#[case] actual: String, #[case] expected: &str) {
        assert_eq!(actual, expected);
    }

    #[test]
    fn encodes_identifiers() {
        assert_eq!(session("a/b c"), "/sessions/a%2Fb%20c");
    }
}
