//! Loading the question bank and topic weights from JSON files.
//!
//! `questions.json` holds `{"questions": [...]}` where each entry has `main_topic`,
//! `question`, `options`, `answer`, and optional `explanation` and `example`.
//! `topics.json` holds `[{"name": ..., "weight": ...}]`.

use std::path::{Path, PathBuf};

use quiz_core::model::{Question, QuestionBank, QuestionError, TopicWeightError, TopicWeights};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const TOPICS_FILE: &str = "topics.json";

/// Errors raised while reading bank files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bank data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question #{index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error(transparent)]
    InvalidWeights(#[from] TopicWeightError),
}

/// Persisted shape for a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub main_topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            main_topic: question.main_topic().to_owned(),
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            answer: question.answer().to_owned(),
            explanation: question.explanation().map(str::to_owned),
            example: question.example().map(str::to_owned),
        }
    }

    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record fails validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            self.main_topic,
            self.question,
            self.options,
            self.answer,
            self.explanation,
            self.example,
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct QuestionFile {
    questions: Vec<QuestionRecord>,
}

/// Persisted shape for a topic weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub name: String,
    pub weight: u32,
}

/// Parse a question bank from `questions.json` contents.
///
/// # Errors
///
/// Returns `BankLoadError::Parse` for malformed JSON and
/// `BankLoadError::InvalidQuestion` for the first question that fails validation.
pub fn parse_question_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let file: QuestionFile = serde_json::from_str(json)?;
    let questions = file
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_question()
                .map_err(|source| BankLoadError::InvalidQuestion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionBank::new(questions))
}

/// Parse a topic weight table from `topics.json` contents.
///
/// # Errors
///
/// Returns `BankLoadError` for malformed JSON or an invalid table.
pub fn parse_topic_weights(json: &str) -> Result<TopicWeights, BankLoadError> {
    let records: Vec<TopicRecord> = serde_json::from_str(json)?;
    Ok(TopicWeights::new(
        records.into_iter().map(|r| (r.name, r.weight)),
    )?)
}

fn read(path: &Path) -> Result<String, BankLoadError> {
    std::fs::read_to_string(path).map_err(|source| BankLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Question bank and weights loaded once at startup.
#[derive(Debug, Clone)]
pub struct QuizData {
    pub bank: QuestionBank,
    pub weights: TopicWeights,
}

impl QuizData {
    /// Load `questions.json` and `topics.json` from `dir`.
    ///
    /// When `topics.json` is absent the built-in curriculum weights are used.
    ///
    /// # Errors
    ///
    /// Returns `BankLoadError` if a file cannot be read or fails validation.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, BankLoadError> {
        let dir = dir.as_ref();
        let bank = parse_question_bank(&read(&dir.join(QUESTIONS_FILE))?)?;

        let topics_path = dir.join(TOPICS_FILE);
        let weights = if topics_path.exists() {
            parse_topic_weights(&read(&topics_path)?)?
        } else {
            tracing::info!(path = %topics_path.display(), "no topic file, using built-in curriculum");
            TopicWeights::curriculum()
        };

        let unweighted: Vec<&str> = bank
            .topics()
            .into_iter()
            .filter(|t| !weights.contains(t))
            .collect();
        if !unweighted.is_empty() {
            tracing::warn!(
                topics = ?unweighted,
                "questions with these topics have no weight and will never be selected"
            );
        }

        tracing::info!(
            questions = bank.len(),
            topics = weights.len(),
            dir = %dir.display(),
            "question bank loaded"
        );
        Ok(Self { bank, weights })
    }
}
