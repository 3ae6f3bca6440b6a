//! Shared error types for the services crate.

use thiserror::Error;

use finlit_core::model::SessionError;
use finlit_storage::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the learning workflow facade.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearningError {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
