use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use finlit_core::model::{
    Achievement, Category, Level, ProgressError, QuizSession, SessionId, UserId, UserProgress,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a user's progress.
///
/// Mirrors the domain `UserProgress` so backends can serialize to JSON (the
/// recommended interchange format) without leaking storage concerns into the
/// domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: String,
    pub current_level: Level,
    pub total_quizzes_completed: u32,
    pub total_questions_answered: u32,
    pub overall_accuracy: f64,
    pub category_mastery: BTreeMap<Category, f64>,
    pub learning_streak: u32,
    pub achievements: BTreeSet<Achievement>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            user_id: progress.user_id().as_str().to_owned(),
            current_level: progress.current_level(),
            total_quizzes_completed: progress.total_quizzes_completed(),
            total_questions_answered: progress.total_questions_answered(),
            overall_accuracy: progress.overall_accuracy(),
            category_mastery: progress.category_mastery().clone(),
            learning_streak: progress.learning_streak(),
            achievements: progress.achievements().clone(),
            last_activity: progress.last_activity(),
        }
    }

    /// Convert the record back into domain `UserProgress`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the persisted accuracy is out of bounds.
    pub fn into_progress(self) -> Result<UserProgress, ProgressError> {
        UserProgress::from_persisted(
            UserId::new(self.user_id),
            self.current_level,
            self.total_quizzes_completed,
            self.total_questions_answered,
            self.overall_accuracy,
            self.category_mastery,
            self.learning_streak,
            self.achievements,
            self.last_activity,
        )
    }
}

/// Repository contract for cumulative user progress.
///
/// The persistence layer is owned by the caller; this core only requires
/// load/save semantics. A missing user is a normal outcome, not an error.
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored progress for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or decoded.
    fn load_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>, StorageError>;

    /// Persist or update a progress snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError>;
}

/// Repository contract for quiz sessions.
pub trait SessionRepository: Send + Sync {
    /// Persist or update a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    fn save_session(&self, session: &QuizSession) -> Result<(), StorageError>;

    /// Fetch a session by id, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or decoded.
    fn load_session(&self, id: SessionId) -> Result<Option<QuizSession>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<UserId, UserProgress>>>,
    sessions: Arc<Mutex<HashMap<SessionId, QuizSession>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressRepository for InMemoryRepository {
    fn load_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_id).cloned())
    }

    fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(progress.user_id().clone(), progress.clone());
        Ok(())
    }
}

impl SessionRepository for InMemoryRepository {
    fn save_session(&self, session: &QuizSession) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(session.session_id(), session.clone());
        Ok(())
    }

    fn load_session(&self, id: SessionId) -> Result<Option<QuizSession>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo);
        Self { progress, sessions }
    }
}
