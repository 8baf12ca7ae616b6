use async_trait::async_trait;
use quiz_core::model::{QuizSession, SessionKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence contract for per-user quiz sessions.
///
/// Backends only store and return the record; they never interpret it. Concurrent
/// saves for the same key are last-writer-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the session stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self, key: SessionKey) -> Result<Option<QuizSession>, StorageError>;

    /// Persist or replace the session stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save(&self, key: SessionKey, session: &QuizSession) -> Result<(), StorageError>;

    /// Drop the session stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: SessionKey) -> Result<(), StorageError>;
}

/// Simple in-memory session store for tests and single-process use.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionKey, QuizSession>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of live sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn session_count(&self) -> Result<usize, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: SessionKey) -> Result<Option<QuizSession>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn save(&self, key: SessionKey, session: &QuizSession) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, session.clone());
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

/// Aggregates storage backends behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self { sessions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;

    fn session(answers: &[&str]) -> QuizSession {
        QuizSession::from_parts(
            vec![QuestionId::new(3), QuestionId::new(1)],
            answers.iter().map(|s| (*s).to_owned()).collect(),
        )
    }

    #[tokio::test]
    async fn saves_and_replaces_sessions() {
        let store = InMemorySessionStore::new();
        let key = SessionKey::generate();
        assert!(store.load(key).await.unwrap().is_none());

        store.save(key, &session(&[])).await.unwrap();
        store.save(key, &session(&["a"])).await.unwrap();

        let loaded = store.load(key).await.unwrap().unwrap();
        assert_eq!(loaded.answers(), ["a"]);
        assert_eq!(store.session_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_key() {
        let store = InMemorySessionStore::new();
        let (alice, bob) = (SessionKey::generate(), SessionKey::generate());
        store.save(alice, &session(&["a"])).await.unwrap();

        assert!(store.load(bob).await.unwrap().is_none());

        store.remove(alice).await.unwrap();
        store.remove(bob).await.unwrap();
        assert!(store.load(alice).await.unwrap().is_none());
    }
}
