//! Schema-change commands.
//!
//! Each command kind carries only the fields that kind needs, so an index
//! command cannot smuggle foreign-key fields and vice versa. The flat
//! `name()` tag keeps the ordered linear lookup that blueprint compilation
//! relies on.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDefinition, ForeignKeyAction};

/// A foreign-key constraint to embed in a `create table` statement.
///
/// SQLite cannot add a foreign key after table creation, so these only ever
/// appear alongside the create-table command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referencing columns on the table being created.
    pub columns: Vec<String>,
    /// Referenced table (logical name; the grammar applies the prefix).
    pub on: String,
    /// Referenced columns.
    pub references: Vec<String>,
    /// `on delete` action, omitted when not set.
    pub on_delete: Option<ForeignKeyAction>,
    /// `on update` action, omitted when not set.
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKey {
    /// Creates a foreign key with no referential actions.
    #[must_use]
    pub fn new(columns: Vec<String>, on: impl Into<String>, references: Vec<String>) -> Self {
        Self {
            columns,
            on: on.into(),
            references,
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the `on delete` action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `on update` action.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// An index to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCommand {
    /// Index name (never prefixed).
    pub name: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

/// A rename, for either a column or an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    /// Current name.
    pub from: String,
    /// New name.
    pub to: String,
}

impl Rename {
    /// Creates a rename command.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A single schema-change instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Add a column to an existing table.
    Add(ColumnDefinition),
    /// Drop the named columns.
    DropColumn(Vec<String>),
    /// Declare a foreign key at table creation.
    Foreign(ForeignKey),
    /// Create an index.
    Index(IndexCommand),
    /// Declare the primary key columns at table creation.
    Primary(Vec<String>),
    /// Rename a column.
    RenameColumn(Rename),
    /// Rename an index.
    RenameIndex(Rename),
}

impl Command {
    /// The stable kind tag used for command lookups.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::DropColumn(_) => "drop_column",
            Self::Foreign(_) => "foreign",
            Self::Index(_) => "index",
            Self::Primary(_) => "primary",
            Self::RenameColumn(_) => "rename_column",
            Self::RenameIndex(_) => "rename_index",
        }
    }
}

/// Returns the first command whose kind tag equals `name`.
#[must_use]
pub fn get_command_by_name<'a>(commands: &'a [Command], name: &str) -> Option<&'a Command> {
    commands.iter().find(|command| command.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_command_by_name() {
        let commands = vec![
            Command::Primary(vec!["id".to_string()]),
            Command::DropColumn(vec!["legacy".to_string()]),
            Command::RenameColumn(Rename::new("before", "after")),
        ];

        let found = get_command_by_name(&commands, "drop_column");
        assert!(found.is_some());
        assert_eq!(found.unwrap().name(), "drop_column");

        assert!(get_command_by_name(&commands, "foreign").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let commands = vec![
            Command::DropColumn(vec!["a".to_string()]),
            Command::DropColumn(vec!["b".to_string()]),
        ];

        let found = get_command_by_name(&commands, "drop_column");
        assert_eq!(
            found,
            Some(&Command::DropColumn(vec!["a".to_string()]))
        );
    }

    #[test]
    fn test_foreign_key_builder() {
        let foreign_key = ForeignKey::new(
            vec!["role_id".to_string()],
            "roles",
            vec!["id".to_string()],
        )
        .on_delete(ForeignKeyAction::Cascade);

        assert_eq!(foreign_key.on, "roles");
        assert_eq!(foreign_key.on_delete, Some(ForeignKeyAction::Cascade));
        assert_eq!(foreign_key.on_update, None);
    }
}
