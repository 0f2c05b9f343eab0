//! Schema value types.
//!
//! A [`Blueprint`] is the caller-supplied description of one table's pending
//! changes: the columns to add plus the ordered list of commands to run. The
//! grammar only ever reads these values; it never mutates them.

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// Logical column types understood by the grammar.
///
/// These are database-agnostic tags; the grammar maps each one to the SQLite
/// fragment it compiles to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit integer.
    BigInteger,
    /// Raw bytes.
    Binary,
    /// Boolean, stored as `tinyint(1)`.
    Boolean,
    /// Fixed-length character string.
    Char,
    /// Date only.
    Date,
    /// Date and time.
    DateTime,
    /// Arbitrary-precision numeric.
    Decimal,
    /// Double-precision float.
    Double,
    /// One of a fixed set of string values, enforced with a `check` clause.
    Enum(Vec<String>),
    /// Single-precision float.
    Float,
    /// 32-bit integer.
    Integer,
    /// JSON document, stored as text.
    Json,
    /// Variable-length character string.
    String,
    /// Unbounded text.
    Text,
    /// Time only.
    Time,
    /// Timestamp (alias for DateTime on SQLite).
    Timestamp,
}

impl ColumnType {
    /// Returns true for the integer-family types that can auto-increment.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer | Self::BigInteger)
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// Boolean default, stored as 0/1.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// SQL expression (e.g. `CURRENT_TIMESTAMP`), emitted verbatim.
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL literal for this default value.
    ///
    /// Strings are single-quoted with embedded quotes doubled; everything
    /// else uses its plain literal form.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Bool(value) => if *value { "1" } else { "0" }.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => format!("'{}'", value.replace('\'', "''")),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// Referential action for `on delete` / `on update` clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ForeignKeyAction {
    /// No action (the engine errors if the referenced row goes away).
    #[default]
    NoAction,
    /// Restrict, checked immediately.
    Restrict,
    /// Cascade the delete/update to referencing rows.
    Cascade,
    /// Set the referencing column to NULL.
    SetNull,
    /// Set the referencing column to its default.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL keyword sequence for this action.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "no action",
            Self::Restrict => "restrict",
            Self::Cascade => "cascade",
            Self::SetNull => "set null",
            Self::SetDefault => "set default",
        }
    }
}

/// Definition of a column to add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Logical type.
    pub column_type: ColumnType,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
    /// Whether the column allows NULL.
    pub nullable: bool,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
}

impl ColumnDefinition {
    /// Creates a not-null column of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            default: None,
            nullable: false,
            auto_increment: false,
        }
    }

    /// Allows NULL values.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

/// An existing index as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns, in index order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Whether the index backs the table's primary key.
    pub primary: bool,
}

/// One table's pending schema changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    table: String,
    columns: Vec<ColumnDefinition>,
    commands: Vec<Command>,
}

impl Blueprint {
    /// Creates an empty blueprint for a logical (unprefixed) table name.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Adds a column definition.
    #[must_use]
    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a command.
    #[must_use]
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// The logical table name, without prefix.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// The columns added by this blueprint, in declaration order.
    #[must_use]
    pub fn added_columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// The pending commands, in the order they were queued.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_definition_builder() {
        let column = ColumnDefinition::new("id", ColumnType::Integer).auto_increment();

        assert_eq!(column.name, "id");
        assert!(column.auto_increment);
        assert!(!column.nullable);
        assert_eq!(column.default, None);
    }

    #[test]
    fn test_default_value_to_sql() {
        assert_eq!(DefaultValue::Bool(true).to_sql(), "1");
        assert_eq!(DefaultValue::Bool(false).to_sql(), "0");
        assert_eq!(DefaultValue::Integer(42).to_sql(), "42");
        assert_eq!(DefaultValue::String("hello".to_string()).to_sql(), "'hello'");
        assert_eq!(
            DefaultValue::String("it's".to_string()).to_sql(),
            "'it''s'"
        );
        assert_eq!(
            DefaultValue::Expression("CURRENT_TIMESTAMP".to_string()).to_sql(),
            "CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_integer_family() {
        assert!(ColumnType::Integer.is_integer());
        assert!(ColumnType::BigInteger.is_integer());
        assert!(!ColumnType::String.is_integer());
        assert!(!ColumnType::Boolean.is_integer());
    }

    #[test]
    fn test_foreign_key_action_sql() {
        assert_eq!(ForeignKeyAction::Cascade.as_sql(), "cascade");
        assert_eq!(ForeignKeyAction::SetNull.as_sql(), "set null");
        assert_eq!(ForeignKeyAction::NoAction.as_sql(), "no action");
    }

    #[test]
    fn test_blueprint_builder() {
        let users = Blueprint::new("users")
            .column(ColumnDefinition::new("id", ColumnType::Integer).auto_increment())
            .column(ColumnDefinition::new("name", ColumnType::String).nullable());

        assert_eq!(users.table_name(), "users");
        assert_eq!(users.added_columns().len(), 2);
        assert!(users.commands().is_empty());
    }
}
