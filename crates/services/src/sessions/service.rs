use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{QuestionBank, QuizSession, ResultReport, SessionKey, TopicWeights};
use quiz_core::progression::{self, QuestionView, Step};
use quiz_core::{
    Allocation, ConfigurationError, InvalidSessionReason, QuizError, QuizSettings, allocate,
    scoring,
};
use storage::repository::SessionStore;

use super::progress::SessionProgress;
use super::sampler;
use crate::error::QuizServiceError;

/// Orchestrates topic selection, question progression, and scoring on top of a
/// session store.
///
/// The bank and weights are shared read-only; each call loads the caller's session,
/// applies one synchronous step, and saves it back.
pub struct QuizService {
    bank: Arc<QuestionBank>,
    weights: Arc<TopicWeights>,
    settings: QuizSettings,
    sessions: Arc<dyn SessionStore>,
    rng: Mutex<StdRng>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        weights: Arc<TopicWeights>,
        settings: QuizSettings,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            bank,
            weights,
            settings,
            sessions,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Use a fixed seed for sampling so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn weights(&self) -> &TopicWeights {
        &self.weights
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Validate a topic selection and compute its allocation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Configuration` if fewer than `min_topics` distinct topics
    /// are selected or a topic has no weight.
    pub fn plan<S: AsRef<str>>(&self, selected: &[S]) -> Result<Allocation, QuizError> {
        let mut distinct: Vec<&str> = Vec::with_capacity(selected.len());
        for topic in selected {
            if !distinct.contains(&topic.as_ref()) {
                distinct.push(topic.as_ref());
            }
        }
        if distinct.len() < self.settings.min_topics() {
            return Err(ConfigurationError::TooFewTopics {
                selected: distinct.len(),
                min: self.settings.min_topics(),
            }
            .into());
        }
        Ok(allocate(
            &distinct,
            &self.weights,
            self.settings.question_limit(),
        )?)
    }

    /// Start (or restart) a quiz for `key` over the selected topics.
    ///
    /// Any previous session under `key` is replaced. Nothing is stored on failure.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Configuration` for an invalid selection,
    /// `QuizError::EmptyPool` if no questions exist for it, or `StorageError` if the
    /// session cannot be saved.
    pub async fn start<S: AsRef<str> + Sync>(
        &self,
        key: SessionKey,
        selected: &[S],
    ) -> Result<QuestionView<'_>, QuizServiceError> {
        let allocation = self.plan(selected).inspect_err(|e| log_rejection(key, e))?;
        let sequence = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            sampler::sample(&allocation, &self.bank, &mut *rng)
        }
        .inspect_err(|e| log_rejection(key, e))?;

        let session = QuizSession::new(sequence);
        self.sessions.save(key, &session).await?;
        tracing::info!(
            %key,
            topics = allocation.len(),
            requested = allocation.total(),
            drawn = session.total(),
            "quiz started"
        );

        Ok(progression::current_question(&session, &self.bank)?)
    }

    /// The question at `index`, for display or back-navigation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSession` if there is no session or `index` is out of
    /// range.
    pub async fn question(
        &self,
        key: SessionKey,
        index: usize,
    ) -> Result<QuestionView<'_>, QuizServiceError> {
        let session = self.load(key).await?;
        progression::question_at(&session, &self.bank, index)
            .inspect_err(|e| log_rejection(key, e))
            .map_err(Into::into)
    }

    /// The next unanswered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSession` if there is no session or nothing is left
    /// to answer.
    pub async fn current(&self, key: SessionKey) -> Result<QuestionView<'_>, QuizServiceError> {
        let session = self.load(key).await?;
        progression::current_question(&session, &self.bank)
            .inspect_err(|e| log_rejection(key, e))
            .map_err(Into::into)
    }

    /// Record an answer at `index` and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSession` for a missing session or an index that is
    /// out of range or ahead of the cursor, or `StorageError` if saving fails.
    pub async fn submit(
        &self,
        key: SessionKey,
        index: usize,
        selected: Option<&str>,
    ) -> Result<Step, QuizServiceError> {
        let mut session = self.load(key).await?;
        let step = progression::submit_answer(&mut session, index, selected)
            .inspect_err(|e| log_rejection(key, e))?;
        self.sessions.save(key, &session).await?;

        match step {
            Step::Next(next) => tracing::debug!(%key, index, next, "answer recorded"),
            Step::Completed => tracing::info!(%key, total = session.total(), "quiz completed"),
        }
        Ok(step)
    }

    /// Score the finished attempt for `key`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSession` if there is no usable session and
    /// `QuizError::IncompleteAttempt` if some questions are unanswered.
    pub async fn result(&self, key: SessionKey) -> Result<ResultReport, QuizServiceError> {
        let session = self.load(key).await?;
        let report = scoring::score(session.question_sequence(), session.answers(), &self.bank)
            .inspect_err(|e| log_rejection(key, e))?;
        tracing::info!(%key, score = report.score(), total = report.total(), "quiz scored");
        Ok(report)
    }

    /// Progress counters for `key`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSession` if there is no session.
    pub async fn progress(&self, key: SessionKey) -> Result<SessionProgress, QuizServiceError> {
        let session = self.load(key).await?;
        Ok(SessionProgress::of(&session))
    }

    /// Discard the session for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub async fn restart(&self, key: SessionKey) -> Result<(), QuizServiceError> {
        self.sessions.remove(key).await?;
        tracing::debug!(%key, "session discarded");
        Ok(())
    }

    async fn load(&self, key: SessionKey) -> Result<QuizSession, QuizServiceError> {
        match self.sessions.load(key).await? {
            Some(session) => Ok(session),
            None => {
                let err = QuizError::InvalidSession(InvalidSessionReason::Missing);
                log_rejection(key, &err);
                Err(err.into())
            }
        }
    }
}

fn log_rejection(key: SessionKey, err: &QuizError) {
    tracing::warn!(%key, error = %err, "quiz request rejected, back to topic selection");
}
