//! Index metadata access.
//!
//! Renaming an index requires knowing what the index currently looks like,
//! so the grammar reads existing index metadata through the [`SchemaReader`]
//! seam. The loader here backs that seam with SQLite's `pragma_index_list`
//! and `pragma_index_info` table-valued functions.

use sqlx::sqlite::SqlitePool;

use crate::error::Result;
use crate::schema::Index;

/// Supplies existing index metadata for a table.
pub trait SchemaReader {
    /// Returns all indexes (including primary and unique) for an unprefixed
    /// table name.
    fn indexes(&self, table: &str) -> Result<Vec<Index>>;
}

/// Reads the indexes of `table` from a live connection pool.
///
/// The primary flag comes from the index origin (`pk`); column order follows
/// the index definition. Expression index members, which have no column
/// name, are skipped.
pub async fn load_indexes(pool: &SqlitePool, table: &str) -> Result<Vec<Index>> {
    let rows: Vec<(String, i64, String)> =
        sqlx::query_as("SELECT name, \"unique\", origin FROM pragma_index_list(?) ORDER BY seq")
            .bind(table)
            .fetch_all(pool)
            .await?;

    let mut indexes = Vec::new();
    for (name, unique, origin) in rows {
        let members: Vec<(i64, Option<String>)> =
            sqlx::query_as("SELECT seqno, name FROM pragma_index_info(?) ORDER BY seqno")
                .bind(&name)
                .fetch_all(pool)
                .await?;

        indexes.push(Index {
            columns: members
                .into_iter()
                .filter_map(|(_, column)| column)
                .collect(),
            unique: unique == 1,
            primary: origin == "pk",
            name,
        });
    }

    Ok(indexes)
}

/// Prefetched indexes of a single table.
///
/// Bridges the async loader and the synchronous [`SchemaReader`] contract:
/// load once, then hand the snapshot to the grammar as a plain value.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    table: String,
    indexes: Vec<Index>,
}

impl IndexSnapshot {
    /// Creates a snapshot from already-known indexes.
    #[must_use]
    pub fn new(table: impl Into<String>, indexes: Vec<Index>) -> Self {
        Self {
            table: table.into(),
            indexes,
        }
    }

    /// Loads the snapshot for `table` from a live connection pool.
    pub async fn load(pool: &SqlitePool, table: &str) -> Result<Self> {
        Ok(Self::new(table, load_indexes(pool, table).await?))
    }
}

impl SchemaReader for IndexSnapshot {
    fn indexes(&self, table: &str) -> Result<Vec<Index>> {
        if table == self.table {
            Ok(self.indexes.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn pool() -> SqlitePool {
        // One connection, so every statement sees the same in-memory database.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn exec(pool: &SqlitePool, sql: &str) {
        sqlx::query(sql).execute(pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_indexes_reports_uniqueness_and_column_order() {
        let pool = pool().await;
        exec(
            &pool,
            "create table \"users\" (\"id\" integer primary key autoincrement not null, \
             \"name\" varchar null, \"email\" varchar null)",
        )
        .await;
        exec(&pool, "create unique index \"users_email\" on \"users\" (\"email\")").await;
        exec(
            &pool,
            "create index \"users_name_email\" on \"users\" (\"name\", \"email\")",
        )
        .await;

        let indexes = load_indexes(&pool, "users").await.unwrap();
        assert_eq!(indexes.len(), 2);

        let by_email = indexes.iter().find(|i| i.name == "users_email").unwrap();
        assert!(by_email.unique);
        assert!(!by_email.primary);
        assert_eq!(by_email.columns, vec!["email".to_string()]);

        let composite = indexes
            .iter()
            .find(|i| i.name == "users_name_email")
            .unwrap();
        assert!(!composite.unique);
        assert_eq!(
            composite.columns,
            vec!["name".to_string(), "email".to_string()]
        );
    }

    #[tokio::test]
    async fn test_load_indexes_flags_primary_key_index() {
        let pool = pool().await;
        // A text primary key forces SQLite to back it with a real index.
        exec(
            &pool,
            "create table \"tags\" (\"slug\" varchar not null, \"label\" varchar null, \
             primary key (\"slug\"))",
        )
        .await;

        let indexes = load_indexes(&pool, "tags").await.unwrap();
        assert_eq!(indexes.len(), 1);
        assert!(indexes[0].primary);
        assert!(indexes[0].unique);
        assert_eq!(indexes[0].columns, vec!["slug".to_string()]);
    }

    #[tokio::test]
    async fn test_load_indexes_empty_for_unindexed_table() {
        let pool = pool().await;
        // An integer primary key is a rowid alias and needs no index.
        exec(
            &pool,
            "create table \"logs\" (\"id\" integer primary key autoincrement not null)",
        )
        .await;

        assert!(load_indexes(&pool, "logs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_answers_only_for_its_table() {
        let pool = pool().await;
        exec(&pool, "create table \"users\" (\"email\" varchar null)").await;
        exec(&pool, "create index \"users_email\" on \"users\" (\"email\")").await;

        let snapshot = IndexSnapshot::load(&pool, "users").await.unwrap();
        assert_eq!(snapshot.indexes("users").unwrap().len(), 1);
        assert!(snapshot.indexes("admins").unwrap().is_empty());
    }
}
