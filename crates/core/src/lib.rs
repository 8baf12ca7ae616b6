#![forbid(unsafe_code)]

pub mod allocation;
pub mod error;
pub mod model;
pub mod progression;
pub mod scoring;
pub mod settings;

pub use allocation::{Allocation, allocate};
pub use error::{ConfigurationError, InvalidSessionReason, QuizError};
pub use progression::{NOT_ANSWERED, QuestionView, Step};
pub use scoring::score;
pub use settings::{QuizSettings, SettingsError};
