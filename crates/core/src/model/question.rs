use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question topic cannot be empty")]
    EmptyTopic,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must have at least one option")]
    NoOptions,

    #[error("answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

const NO_EXPLANATION: &str = "No explanation provided.";
const NO_EXAMPLE: &str = "No example available.";

/// A multiple-choice question tagged with its main topic.
///
/// Questions are immutable once built; `answer` is always one of `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    main_topic: String,
    text: String,
    options: Vec<String>,
    answer: String,
    explanation: Option<String>,
    example: Option<String>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// Blank explanations and examples are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the topic or text is blank, there are no options,
    /// or `answer` does not exactly match one of the options.
    pub fn new(
        main_topic: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        explanation: Option<String>,
        example: Option<String>,
    ) -> Result<Self, QuestionError> {
        let main_topic = main_topic.into();
        if main_topic.trim().is_empty() {
            return Err(QuestionError::EmptyTopic);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        let answer = answer.into();
        if !options.iter().any(|o| *o == answer) {
            return Err(QuestionError::AnswerNotInOptions { answer });
        }

        Ok(Self {
            main_topic,
            text,
            options,
            answer,
            explanation: explanation.filter(|e| !e.trim().is_empty()),
            example: example.filter(|e| !e.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn main_topic(&self) -> &str {
        &self.main_topic
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The canonical correct option.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    #[must_use]
    pub fn explanation_or_default(&self) -> &str {
        self.explanation().unwrap_or(NO_EXPLANATION)
    }

    #[must_use]
    pub fn example_or_default(&self) -> &str {
        self.example().unwrap_or(NO_EXAMPLE)
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Read-only question repository, indexed by position.
///
/// Loaded once at startup and shared across sessions without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| (QuestionId::new(i), q))
    }

    /// Identifiers of every question whose main topic is `topic`, in bank order.
    #[must_use]
    pub fn ids_for_topic(&self, topic: &str) -> Vec<QuestionId> {
        self.iter()
            .filter(|(_, q)| q.main_topic() == topic)
            .map(|(id, _)| id)
            .collect()
    }

    /// Distinct topics in order of first appearance.
    #[must_use]
    pub fn topics(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !seen.contains(&q.main_topic()) {
                seen.push(q.main_topic());
            }
        }
        seen
    }
}
