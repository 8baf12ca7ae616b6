#![forbid(unsafe_code)]

pub mod bank;
pub mod repository;

pub use bank::{BankLoadError, QuizData};
pub use repository::{InMemorySessionStore, SessionStore, Storage, StorageError};
