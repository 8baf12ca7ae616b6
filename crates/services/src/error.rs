//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizError;
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizServiceError {
    /// The quiz-flow error, if this is one. Those always mean "back to topic selection".
    #[must_use]
    pub fn as_quiz(&self) -> Option<&QuizError> {
        match self {
            Self::Quiz(err) => Some(err),
            Self::Storage(_) => None,
        }
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Quiz(err) => err.user_message(),
            Self::Storage(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}
