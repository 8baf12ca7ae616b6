mod progress;
mod sampler;
mod service;

// Public API of the session subsystem.
pub use crate::error::QuizServiceError;
pub use progress::SessionProgress;
pub use sampler::sample;
pub use service::QuizService;
