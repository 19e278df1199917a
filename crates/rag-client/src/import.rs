//! CSV question import.
//!
//! Uploads are validated and parsed locally; the resulting
//! [`QuestionCreate`] list is what the caller bulk-creates.

use std::path::Path;

use rag_core::payloads::QuestionCreate;

use crate::error::ClientError;
use crate::support::ServiceSupport;

/// Header holding the question text.
pub const QUESTION_HEADER: &str = "Question";

/// Header holding the expected answer.
pub const EXPECTED_ANSWER_HEADER: &str = "Expected Answer";

/// Parses question uploads in the `Question,Expected Answer` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvQuestionImporter;

impl ServiceSupport for CsvQuestionImporter {
    fn service_name(&self) -> &'static str {
        "csv-import"
    }
}

impl CsvQuestionImporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate the file name, then parse `content`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidFileType`] unless `file_name` ends in
    /// `.csv` (any case), otherwise whatever [`Self::parse`] returns.
    pub fn import_file(
        &self,
        file_name: &str,
        content: &str,
    ) -> Result<Vec<QuestionCreate>, ClientError> {
        let is_csv = Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(self.handle_error(
                ClientError::InvalidFileType(file_name.to_string()),
                "csv.import_file",
            ));
        }
        self.parse(content)
    }

    /// Parse CSV text into question payloads.
    ///
    /// Rows with a blank question are skipped. Values are trimmed and an
    /// empty expected answer becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingHeaders`] when either required header is
    /// absent, or [`ClientError::Csv`] when the text is not readable CSV.
    pub fn parse(&self, content: &str) -> Result<Vec<QuestionCreate>, ClientError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| self.handle_error(ClientError::from(e), "csv.parse"))?
            .clone();
        let position = |name: &str| headers.iter().position(|h| h == name);

        let (question_idx, expected_idx) =
            match (position(QUESTION_HEADER), position(EXPECTED_ANSWER_HEADER)) {
                (Some(q), Some(e)) => (q, e),
                (q, e) => {
                    let missing = [(q, QUESTION_HEADER), (e, EXPECTED_ANSWER_HEADER)]
                        .into_iter()
                        .filter(|(idx, _)| idx.is_none())
                        .map(|(_, name)| name.to_string())
                        .collect();
                    return Err(self.handle_error(ClientError::MissingHeaders(missing), "csv.parse"));
                }
            };

        let mut questions = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let row = record.map_err(|e| {
                self.handle_error(ClientError::from(e), &format!("csv.parse row {}", idx + 1))
            })?;
            let Some(text) = row.get(question_idx).filter(|t| !t.is_empty()) else {
                tracing::debug!(row = idx + 1, "skipping row without question text");
                continue;
            };
            let mut question = QuestionCreate::new(text);
            if let Some(expected) = row.get(expected_idx).filter(|e| !e.is_empty()) {
                question = question.with_expected_answer(expected);
            }
            questions.push(question);
        }

        tracing::debug!(count = questions.len(), "parsed question upload");
        Ok(questions)
    }
}
