use quiz_core::model::QuizSession;
use serde::Serialize;

/// Aggregated view of session progress, useful for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn of(session: &QuizSession) -> Self {
        let total = session.total();
        let answered = session.cursor().min(total);
        Self {
            total,
            answered,
            remaining: total - answered,
            is_complete: session.is_complete(),
        }
    }
}
