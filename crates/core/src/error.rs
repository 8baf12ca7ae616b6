use thiserror::Error;

/// Problems with a topic selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("no topics selected")]
    NoTopics,

    #[error("at least {min} topics must be selected, got {selected}")]
    TooFewTopics { selected: usize, min: usize },

    #[error("unknown topic: {0}")]
    UnknownTopic(String),
}

/// Why a session could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSessionReason {
    /// No session is stored for the caller.
    Missing,
    /// The session has no question sequence.
    Empty,
    /// The requested position is past the end of the question sequence.
    OutOfRange { index: usize, total: usize },
    /// An answer was submitted ahead of the cursor.
    AheadOfCursor { index: usize, cursor: usize },
    /// The session refers to a question the bank does not hold.
    UnknownQuestion { index: usize },
}

impl std::fmt::Display for InvalidSessionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no session"),
            Self::Empty => write!(f, "empty question sequence"),
            Self::OutOfRange { index, total } => {
                write!(f, "index {index} out of range for {total} questions")
            }
            Self::AheadOfCursor { index, cursor } => {
                write!(f, "answer for index {index} submitted ahead of cursor {cursor}")
            }
            Self::UnknownQuestion { index } => write!(f, "unknown question id {index}"),
        }
    }
}

/// Every failure of the quiz flow.
///
/// All variants are user-recoverable: the caller should send the user back to
/// topic selection and never retry the same operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("no questions found for the selected topics")]
    EmptyPool,

    #[error("invalid session: {0}")]
    InvalidSession(InvalidSessionReason),

    #[error("attempt incomplete: {answered} of {total} questions answered")]
    IncompleteAttempt { answered: usize, total: usize },
}

impl QuizError {
    /// Whether the caller must restart topic selection. Always true.
    #[must_use]
    pub fn requires_reselection(&self) -> bool {
        true
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(ConfigurationError::TooFewTopics { min, .. }) => {
                format!("Please select at least {min} topics.")
            }
            Self::Configuration(ConfigurationError::NoTopics) => {
                "Please select at least one topic.".to_owned()
            }
            Self::Configuration(ConfigurationError::UnknownTopic(topic)) => {
                format!("Unknown topic: {topic}. Please select topics again.")
            }
            Self::EmptyPool => "No questions found for selected topics.".to_owned(),
            Self::InvalidSession(_) => {
                "Session expired or invalid. Please select topics again.".to_owned()
            }
            Self::IncompleteAttempt { .. } => "Session expired or incomplete attempt.".to_owned(),
        }
    }
}
