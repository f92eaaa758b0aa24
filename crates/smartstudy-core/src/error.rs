//! Planner errors.
//!
//! Scoring and layout never fail; these errors come from plan edits,
//! configuration and the host store.

use std::path::PathBuf;
use thiserror::Error;

/// Everything a planner operation can fail with.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The host store could not be read or written
    #[error("plan store: {0}")]
    Database(#[from] DatabaseError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// A plan edit was rejected
    #[error("invalid edit: {0}")]
    Validation(#[from] ValidationError),

    /// A task or subject id that does not exist
    #[error("no {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    /// Plan state that could not be encoded or decoded
    #[error("plan json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "task",
            id: id.into(),
        }
    }

    pub fn subject_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "subject",
            id: id.into(),
        }
    }
}

/// Failures of the SQLite host store.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("cannot open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("statement failed: {0}")]
    QueryFailed(String),

    /// Another process holds the write lock
    #[error("store is locked by another process")]
    Locked,
}

/// Failures loading or editing `config.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("cannot write {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path that names no field, e.g. `timeline.nope`
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("bad value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("data directory unavailable: {0}")]
    DataDir(String),
}

/// Reasons a plan edit is refused.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(String),

    #[error("{kind} '{id}' already exists")]
    Duplicate { kind: String, id: String },

    /// Out-of-range numbers such as a difficulty weight of 4
    #[error("{field} {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = &err {
            if code.code == rusqlite::ErrorCode::DatabaseLocked {
                return Self::Locked;
            }
        }
        Self::QueryFailed(err.to_string())
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result of a plan edit.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
