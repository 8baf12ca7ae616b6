#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::QuizServiceError;
pub use quiz_core::progression::{QuestionView, Step};
pub use sessions::{QuizService, SessionProgress};
