use super::domain::Username;
use super::repository::RepositoryError;

/// Malformed or missing input detected while computing a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{subject} is missing required field `{field}`")]
    MissingField { subject: String, field: &'static str },
    #[error("similarity weights must sum to 1.0 (got {total:.4})")]
    InvalidWeights { total: f64 },
    #[error("gpa span must be finite and positive (got {span})")]
    InvalidGpaSpan { span: f64 },
    #[error("question {question_index} (id {question_id}): cannot parse answer '{raw}'")]
    UnparseableAnswer {
        question_index: usize,
        question_id: u32,
        raw: String,
    },
    #[error("question {question_index} (id {question_id}): score {value} outside 1..=5")]
    AnswerOutOfRange {
        question_index: usize,
        question_id: u32,
        value: i64,
    },
    #[error("question {question_index} (id {question_id}) exceeds the {questions}-question sheet")]
    QuestionOutOfRange {
        question_index: usize,
        question_id: u32,
        questions: usize,
    },
    #[error("questionnaire contains no answers")]
    EmptyQuestionnaire,
}

impl ValidationError {
    pub(crate) fn missing(subject: String, field: &'static str) -> Self {
        Self::MissingField { subject, field }
    }
}

/// Error surfaced by the request-facing guidance operations.
#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    #[error("user {username} not found")]
    UserNotFound { username: Username },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
