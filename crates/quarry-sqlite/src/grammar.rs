//! SQLite DDL grammar.
//!
//! SQLite's `ALTER TABLE` is deliberately small: there is no `ALTER INDEX`,
//! primary keys cannot be altered in place, and only one column can be
//! dropped per statement. The grammar compensates where it can (an index
//! rename becomes a drop plus a recreate) and reports what it cannot do
//! through the diagnostics sink instead of failing the caller's wider
//! migration run.

use std::sync::Arc;

use crate::command::{get_command_by_name, Command, ForeignKey, IndexCommand, Rename};
use crate::diagnostics::DiagnosticSink;
use crate::error::{GrammarError, Result};
use crate::inspector::SchemaReader;
use crate::schema::{Blueprint, ColumnDefinition, ColumnType};

/// Compiles blueprints and commands into SQLite DDL statements.
///
/// The grammar holds only a table-name prefix and a diagnostics sink, both
/// fixed at construction; every compile method is a pure function of its
/// arguments plus those two fields, so one instance can serve concurrent
/// callers.
pub struct Grammar {
    sink: Arc<dyn DiagnosticSink>,
    prefix: String,
}

impl Grammar {
    /// Creates a grammar with a diagnostics sink and a table-name prefix.
    #[must_use]
    pub fn new(sink: Arc<dyn DiagnosticSink>, prefix: impl Into<String>) -> Self {
        Self {
            sink,
            prefix: prefix.into(),
        }
    }

    /// Quotes an identifier with SQLite's standard double quotes.
    fn quote(name: &str) -> String {
        format!("\"{name}\"")
    }

    /// Quotes a physical table reference, applying the prefix.
    ///
    /// Column and index names are never prefixed; only table references are.
    fn quote_table(&self, table: &str) -> String {
        format!("\"{}{table}\"", self.prefix)
    }

    fn quote_list(names: &[String]) -> String {
        names
            .iter()
            .map(|name| Self::quote(name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Maps a logical column type to its SQLite type fragment.
    #[must_use]
    pub fn sql_type(&self, column: &ColumnDefinition) -> String {
        match &column.column_type {
            ColumnType::BigInteger => "bigint".to_string(),
            ColumnType::Binary => "blob".to_string(),
            ColumnType::Boolean => "tinyint(1)".to_string(),
            ColumnType::Char | ColumnType::String => "varchar".to_string(),
            ColumnType::Date => "date".to_string(),
            ColumnType::DateTime | ColumnType::Timestamp => "datetime".to_string(),
            ColumnType::Decimal => "numeric".to_string(),
            ColumnType::Double => "double".to_string(),
            ColumnType::Enum(allowed) => format!(
                "varchar check ({} in ({}))",
                Self::quote(&column.name),
                allowed
                    .iter()
                    .map(|value| format!("'{}'", value.replace('\'', "''")))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ColumnType::Float => "float".to_string(),
            ColumnType::Integer => "integer".to_string(),
            ColumnType::Json | ColumnType::Text => "text".to_string(),
            ColumnType::Time => "time".to_string(),
        }
    }

    /// Emits ` default <literal>` when the column declares a default.
    #[must_use]
    pub fn modify_default(&self, column: &ColumnDefinition) -> String {
        column
            .default
            .as_ref()
            .map_or_else(String::new, |value| format!(" default {}", value.to_sql()))
    }

    /// Emits the single-column primary-key form SQLite requires for
    /// auto-increment columns.
    ///
    /// Only integer-family columns can auto-increment; a table whose sole
    /// primary key is such a column must not also queue a primary command.
    #[must_use]
    pub fn modify_increment(&self, column: &ColumnDefinition) -> String {
        if column.column_type.is_integer() && column.auto_increment {
            " primary key autoincrement".to_string()
        } else {
            String::new()
        }
    }

    /// Emits ` null` or ` not null`, from the nullable flag alone.
    #[must_use]
    pub fn modify_nullable(&self, column: &ColumnDefinition) -> String {
        if column.nullable {
            " null".to_string()
        } else {
            " not null".to_string()
        }
    }

    /// Renders the blueprint's added columns, in declaration order.
    #[must_use]
    pub fn get_columns(&self, blueprint: &Blueprint) -> Vec<String> {
        blueprint
            .added_columns()
            .iter()
            .map(|column| {
                format!(
                    "{} {}{}{}{}",
                    Self::quote(&column.name),
                    self.sql_type(column),
                    self.modify_default(column),
                    self.modify_increment(column),
                    self.modify_nullable(column),
                )
            })
            .collect()
    }

    /// Renders the `foreign key … references …` clauses of a command list.
    ///
    /// Each clause carries its own leading comma so the result drops
    /// straight into a `create table` column list.
    #[must_use]
    pub fn add_foreign_keys(&self, commands: &[Command]) -> String {
        commands
            .iter()
            .filter_map(|command| match command {
                Command::Foreign(foreign_key) => Some(self.foreign_key_sql(foreign_key)),
                _ => None,
            })
            .collect()
    }

    fn foreign_key_sql(&self, foreign_key: &ForeignKey) -> String {
        let mut sql = format!(
            ", foreign key({}) references {}({})",
            Self::quote_list(&foreign_key.columns),
            self.quote_table(&foreign_key.on),
            Self::quote_list(&foreign_key.references),
        );
        if let Some(action) = foreign_key.on_delete {
            sql.push_str(&format!(" on delete {}", action.as_sql()));
        }
        if let Some(action) = foreign_key.on_update {
            sql.push_str(&format!(" on update {}", action.as_sql()));
        }
        sql
    }

    fn primary_key_sql(&self, commands: &[Command]) -> String {
        match get_command_by_name(commands, "primary") {
            Some(Command::Primary(columns)) => {
                format!(", primary key ({})", Self::quote_list(columns))
            }
            _ => String::new(),
        }
    }

    /// Compiles a `create table` statement.
    ///
    /// Columns come first, then any foreign-key clauses, then the primary
    /// key clause when a primary command is queued. Absent sections
    /// contribute no separators.
    #[must_use]
    pub fn compile_create(&self, blueprint: &Blueprint) -> String {
        format!(
            "create table {} ({}{}{})",
            self.quote_table(blueprint.table_name()),
            self.get_columns(blueprint).join(", "),
            self.add_foreign_keys(blueprint.commands()),
            self.primary_key_sql(blueprint.commands()),
        )
    }

    /// Compiles an `alter table … add column` statement.
    ///
    /// SQLite cannot add an auto-increment column to an existing table, so
    /// the increment modifier is omitted here rather than rejected.
    #[must_use]
    pub fn compile_add(&self, blueprint: &Blueprint, column: &ColumnDefinition) -> String {
        format!(
            "alter table {} add column {} {}{}{}",
            self.quote_table(blueprint.table_name()),
            Self::quote(&column.name),
            self.sql_type(column),
            self.modify_default(column),
            self.modify_nullable(column),
        )
    }

    /// Compiles one `drop column` statement per column, in input order.
    ///
    /// SQLite's `alter table` drops a single column at a time.
    #[must_use]
    pub fn compile_drop_column(&self, blueprint: &Blueprint, columns: &[String]) -> Vec<String> {
        let table = self.quote_table(blueprint.table_name());
        columns
            .iter()
            .map(|column| format!("alter table {table} drop column {}", Self::quote(column)))
            .collect()
    }

    /// Compiles a `drop table` statement.
    #[must_use]
    pub fn compile_drop(&self, blueprint: &Blueprint) -> String {
        format!("drop table {}", self.quote_table(blueprint.table_name()))
    }

    /// Compiles a `drop table if exists` statement.
    #[must_use]
    pub fn compile_drop_if_exists(&self, blueprint: &Blueprint) -> String {
        format!(
            "drop table if exists {}",
            self.quote_table(blueprint.table_name())
        )
    }

    /// Compiles an `alter table … rename to` statement.
    ///
    /// The prefix applies to both sides of the rename.
    #[must_use]
    pub fn compile_rename(&self, blueprint: &Blueprint, to: &str) -> String {
        format!(
            "alter table {} rename to {}",
            self.quote_table(blueprint.table_name()),
            self.quote_table(to),
        )
    }

    /// Compiles a `create index` statement.
    #[must_use]
    pub fn compile_index(&self, blueprint: &Blueprint, command: &IndexCommand) -> String {
        self.create_index_sql(
            &command.name,
            blueprint.table_name(),
            &command.columns,
            command.unique,
        )
    }

    /// Compiles a `drop index` statement; index names are never prefixed.
    #[must_use]
    pub fn compile_drop_index(&self, command: &IndexCommand) -> String {
        format!("drop index {}", Self::quote(&command.name))
    }

    fn create_index_sql(&self, name: &str, table: &str, columns: &[String], unique: bool) -> String {
        format!(
            "create {}index {} on {} ({})",
            if unique { "unique " } else { "" },
            Self::quote(name),
            self.quote_table(table),
            Self::quote_list(columns),
        )
    }

    /// Compiles an `alter table … rename column` statement.
    ///
    /// The schema reader is unused; the signature mirrors
    /// `compile_rename_index`, which must consult existing indexes. Fails
    /// only when a name is missing from the command.
    pub fn compile_rename_column(
        &self,
        _schema: &dyn SchemaReader,
        blueprint: &Blueprint,
        command: &Rename,
    ) -> Result<String> {
        if command.from.is_empty() || command.to.is_empty() {
            return Err(GrammarError::EmptyRename);
        }

        Ok(format!(
            "alter table {} rename column {} to {}",
            self.quote_table(blueprint.table_name()),
            Self::quote(&command.from),
            Self::quote(&command.to),
        ))
    }

    /// Compiles the drop-and-recreate pair SQLite needs to rename an index.
    ///
    /// Degraded conditions never fail the caller: a reader error, a missing
    /// index, or a primary-key rename each produce a diagnostic and an
    /// empty result, so a larger migration sequence keeps going.
    #[must_use]
    pub fn compile_rename_index(
        &self,
        schema: &dyn SchemaReader,
        blueprint: &Blueprint,
        command: &Rename,
    ) -> Vec<String> {
        let table = blueprint.table_name();
        let indexes = match schema.indexes(table) {
            Ok(indexes) => indexes,
            Err(err) => {
                self.sink
                    .error(&format!("failed to get {table} indexes: {err}"));
                return Vec::new();
            }
        };

        let Some(index) = indexes.iter().find(|index| index.name == command.from) else {
            self.sink
                .warning(&format!("index {} does not exist", command.from));
            return Vec::new();
        };

        if index.primary {
            self.sink
                .warning("SQLite does not support altering primary keys");
            return Vec::new();
        }

        vec![
            format!("drop index {}", Self::quote(&command.from)),
            self.create_index_sql(&command.to, table, &index.columns, index.unique),
        ]
    }

    /// Compiles a single queued command into its statement list.
    ///
    /// Foreign-key and primary-key commands compile to nothing on their
    /// own: SQLite only accepts those constraints inside `create table`,
    /// where `compile_create` picks them up from the blueprint.
    pub fn compile_command(
        &self,
        schema: &dyn SchemaReader,
        blueprint: &Blueprint,
        command: &Command,
    ) -> Result<Vec<String>> {
        match command {
            Command::Add(column) => Ok(vec![self.compile_add(blueprint, column)]),
            Command::DropColumn(columns) => Ok(self.compile_drop_column(blueprint, columns)),
            Command::Foreign(_) | Command::Primary(_) => Ok(Vec::new()),
            Command::Index(index) => Ok(vec![self.compile_index(blueprint, index)]),
            Command::RenameColumn(rename) => {
                Ok(vec![self.compile_rename_column(schema, blueprint, rename)?])
            }
            Command::RenameIndex(rename) => {
                Ok(self.compile_rename_index(schema, blueprint, rename))
            }
        }
    }
}
