use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Where a session currently is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No question sequence has been drawn.
    NotStarted,
    /// `cursor` is the index of the next unanswered question.
    InProgress { cursor: usize },
    /// Every question has a recorded answer.
    Completed,
}

/// Per-user quiz state: the drawn question order and the answers so far.
///
/// This is the record a session store persists. It is deliberately permissive
/// when rehydrated: inconsistent state is reported by the progression and
/// scoring operations, never by panicking here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    question_sequence: Vec<QuestionId>,
    #[serde(default)]
    answers: Vec<String>,
}

impl QuizSession {
    /// Starts a fresh attempt over `question_sequence` with no answers.
    #[must_use]
    pub fn new(question_sequence: Vec<QuestionId>) -> Self {
        Self {
            question_sequence,
            answers: Vec::new(),
        }
    }

    /// Rehydrate a session from a session store.
    #[must_use]
    pub fn from_parts(question_sequence: Vec<QuestionId>, answers: Vec<String>) -> Self {
        Self {
            question_sequence,
            answers,
        }
    }

    #[must_use]
    pub fn question_sequence(&self) -> &[QuestionId] {
        &self.question_sequence
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub(crate) fn answers_mut(&mut self) -> &mut Vec<String> {
        &mut self.answers
    }

    /// Number of questions in this attempt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.question_sequence.len()
    }

    /// Index of the next unanswered question.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.question_sequence.is_empty() {
            SessionState::NotStarted
        } else if self.answers.len() >= self.question_sequence.len() {
            SessionState::Completed
        } else {
            SessionState::InProgress {
                cursor: self.cursor(),
            }
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state(), SessionState::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<QuestionId> {
        (0..n).map(QuestionId::new).collect()
    }

    #[test]
    fn state_follows_answer_count() {
        assert_eq!(QuizSession::default().state(), SessionState::NotStarted);

        let fresh = QuizSession::new(ids(2));
        assert_eq!(fresh.state(), SessionState::InProgress { cursor: 0 });

        let half = QuizSession::from_parts(ids(2), vec!["a".into()]);
        assert_eq!(half.state(), SessionState::InProgress { cursor: 1 });

        let done = QuizSession::from_parts(ids(2), vec!["a".into(), "b".into()]);
        assert!(done.is_complete());
    }

    #[test]
    fn record_uses_plain_field_names() {
        let session = QuizSession::from_parts(ids(2), vec!["x".into()]);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "question_sequence": [0, 1], "answers": ["x"] })
        );

        let missing_answers: QuizSession =
            serde_json::from_str(r#"{"question_sequence":[3]}"#).unwrap();
        assert_eq!(missing_answers.cursor(), 0);
    }
}
