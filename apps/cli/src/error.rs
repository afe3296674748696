//! # CLI Error Type
//!
//! Unified error type for the menu loop and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Startup                                                               │
//! │  ├── ConfigError            ─► CliError::Config   ─► exit 1            │
//! │  └── DbError (fatal)        ─► CliError::Db       ─► exit 1            │
//! │                                                                         │
//! │  Menu loop                                                             │
//! │  ├── unknown choice         ─► InvalidMenuChoice  ─► notice, continue  │
//! │  ├── ValidationError        ─► notice, re-prompt the same field        │
//! │  ├── CoreError              ─► notice, continue                        │
//! │  ├── DbError (QueryFailed)  ─► stderr, continue                        │
//! │  ├── end of input           ─► InputClosed        ─► exit 0            │
//! │  └── console I/O failure    ─► Io                 ─► exit 1            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::CoreError;
use stockroom_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad environment configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database failure.
    #[error("{0}")]
    Db(#[from] DbError),

    /// Rejected domain input.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Menu choice outside 1-8.
    #[error("Invalid option '{0}', try again.")]
    InvalidMenuChoice(String),

    /// Standard input reached end of file.
    #[error("Input closed")]
    InputClosed,

    /// Console read/write failure.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the menu loop can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Db(e) => !e.is_fatal(),
            CliError::Core(_) | CliError::InvalidMenuChoice(_) => true,
            CliError::Config(_) | CliError::InputClosed | CliError::Io(_) => false,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
