#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    InMemoryRepository, ProgressRecord, ProgressRepository, SessionRepository, Storage,
    StorageError,
};
