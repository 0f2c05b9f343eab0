//! Error types for the grammar.

/// Errors that can occur while compiling schema operations.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// A rename command is missing its source or target name.
    #[error("rename requires both a source and a target name")]
    EmptyRename,

    /// Database error while reading index metadata.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, GrammarError>;
