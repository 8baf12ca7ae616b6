use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question limit must be > 0")]
    InvalidQuestionLimit,

    #[error("minimum topic count must be > 0")]
    InvalidMinTopics,
}

/// Tunables for a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    question_limit: usize,
    min_topics: usize,
}

impl QuizSettings {
    pub const DEFAULT_QUESTION_LIMIT: usize = 60;
    pub const DEFAULT_MIN_TOPICS: usize = 3;

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if either value is zero.
    pub fn new(question_limit: usize, min_topics: usize) -> Result<Self, SettingsError> {
        if question_limit == 0 {
            return Err(SettingsError::InvalidQuestionLimit);
        }
        if min_topics == 0 {
            return Err(SettingsError::InvalidMinTopics);
        }
        Ok(Self {
            question_limit,
            min_topics,
        })
    }

    /// Default settings with a different question limit.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionLimit` if `question_limit` is zero.
    pub fn with_question_limit(question_limit: usize) -> Result<Self, SettingsError> {
        Self::new(question_limit, Self::DEFAULT_MIN_TOPICS)
    }

    /// Target number of questions per attempt.
    #[must_use]
    pub fn question_limit(&self) -> usize {
        self.question_limit
    }

    /// Smallest topic selection accepted when starting a quiz.
    #[must_use]
    pub fn min_topics(&self) -> usize {
        self.min_topics
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_limit: Self::DEFAULT_QUESTION_LIMIT,
            min_topics: Self::DEFAULT_MIN_TOPICS,
        }
    }
}
