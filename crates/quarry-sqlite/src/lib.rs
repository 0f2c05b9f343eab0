//! SQLite DDL grammar for the Quarry schema toolkit.
//!
//! Quarry describes schema changes abstractly: a [`Blueprint`] names a table
//! and carries the columns to add plus an ordered list of [`Command`]s. This
//! crate turns those descriptions into literal SQLite DDL, working around
//! the dialect's gaps where possible:
//!
//! - there is no `ALTER INDEX`, so an index rename compiles to a
//!   `drop index` followed by a `create index` that preserves the original
//!   columns and uniqueness;
//! - primary keys cannot be altered in place, so a primary-key rename is
//!   refused with a diagnostic rather than an error;
//! - `ALTER TABLE` drops one column per statement, so a multi-column drop
//!   compiles to one statement per column.
//!
//! Degraded conditions are reported through a [`DiagnosticSink`] and yield
//! empty results instead of failing, so one bad step does not abort a whole
//! migration run.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use quarry_sqlite::prelude::*;
//!
//! let grammar = Grammar::new(Arc::new(TracingSink), "app_");
//! let users = Blueprint::new("users")
//!     .column(ColumnDefinition::new("id", ColumnType::Integer).auto_increment())
//!     .column(ColumnDefinition::new("name", ColumnType::String).nullable());
//!
//! assert_eq!(
//!     grammar.compile_create(&users),
//!     "create table \"app_users\" (\"id\" integer primary key autoincrement not null, \"name\" varchar null)",
//! );
//! ```
//!
//! [`Blueprint`]: schema::Blueprint
//! [`Command`]: command::Command
//! [`DiagnosticSink`]: diagnostics::DiagnosticSink

pub mod command;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod inspector;
pub mod schema;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::command::{get_command_by_name, Command, ForeignKey, IndexCommand, Rename};
    pub use crate::diagnostics::{DiagnosticSink, TracingSink};
    pub use crate::error::{GrammarError, Result};
    pub use crate::grammar::Grammar;
    pub use crate::inspector::{load_indexes, IndexSnapshot, SchemaReader};
    pub use crate::schema::{
        Blueprint, ColumnDefinition, ColumnType, DefaultValue, ForeignKeyAction, Index,
    };
}
