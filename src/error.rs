//! Error types for text selection, the text store, and the importer.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::Language;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("seed data is unreadable: {0}")]
    Seed(String),

    /// The requested row and the fallback row are both missing.
    #[error("no text with id {id} in the {language} partition and no fallback row")]
    MissingFallback { id: u32, language: Language },
}

/// Failures of the resolver. The first three are validation errors that end
/// the process with their own exit code and a single line on stdout.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Cannot open file - {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("ID must be in range [1,6000]")]
    IdOutOfRange(i64),

    #[error("Select a difficulty level in range [1,5]")]
    DifficultyOutOfRange(i64),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SelectError {
    /// Exit code for validation failures; `None` for faults that should
    /// propagate as ordinary errors.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SelectError::FileNotFound(_) => Some(0),
            SelectError::IdOutOfRange(_) | SelectError::DifficultyOutOfRange(_) => Some(1),
            SelectError::Read { .. } | SelectError::Store(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {line}: id {id} is outside [1,6000]")]
    Id { line: u64, id: i64 },

    #[error("row {line}: difficulty {difficulty} is outside [1,5]")]
    Difficulty { line: u64, difficulty: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for ImportError {
    fn from(e: rusqlite::Error) -> Self {
        ImportError::Store(StoreError::Database(e))
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
