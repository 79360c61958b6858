//! Reading a [`Catalog`] from a SQLite database.

use sqlbind_core::{Catalog, ColumnInfo, TableInfo, TypeRegistry, sql_type};
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use crate::error::Result;

const TABLES_SQL: &str = "SELECT name FROM sqlite_master \
     WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
     ORDER BY name";

const COLUMNS_SQL: &str = "SELECT cid, name, type FROM pragma_table_info(?) ORDER BY cid";

/// Reads every table and view of the database into a [`Catalog`].
///
/// Declared column types are resolved through `types`. Types the registry
/// does not know fall back to SQLite's type affinity rules, so
/// `UNSIGNED BIG INT` is typed as an integer and `NVARCHAR(70)` as text.
pub async fn load_catalog(pool: &SqlitePool, types: &TypeRegistry) -> Result<Catalog> {
    let tables: Vec<(String,)> = sqlx::query_as(TABLES_SQL).fetch_all(pool).await?;

    let mut catalog = Catalog::new();
    for (table,) in tables {
        let rows: Vec<(i64, String, String)> = sqlx::query_as(COLUMNS_SQL)
            .bind(table.as_str())
            .fetch_all(pool)
            .await?;

        let columns: Vec<ColumnInfo> = rows
            .into_iter()
            .enumerate()
            .map(|(position, (_, name, declared))| column_info(position, name, declared, types))
            .collect();
        debug!(table = %table, columns = columns.len(), "Loaded table metadata");
        catalog.insert(TableInfo::new(table, columns));
    }
    Ok(catalog)
}

fn column_info(position: usize, name: String, declared: String, types: &TypeRegistry) -> ColumnInfo {
    let declared = if declared.trim().is_empty() {
        affinity(&declared).to_string()
    } else {
        declared
    };
    let (sql_type, native_type) = types
        .get(&declared)
        .or_else(|| types.get(affinity(&declared)))
        .map_or_else(
            || (sql_type::OTHER, "Vec<u8>".to_string()),
            |info| (info.code, info.native_type.clone()),
        );
    ColumnInfo {
        name,
        position,
        sql_type,
        type_name: declared,
        native_type,
    }
}

/// Maps a declared type to the type name of its SQLite affinity.
///
/// Follows the rules of section 3.1 of the SQLite datatype documentation,
/// checked in order.
#[must_use]
pub fn affinity(declared: &str) -> &'static str {
    let declared = declared.to_uppercase();
    if declared.contains("INT") {
        "INTEGER"
    } else if ["CHAR", "CLOB", "TEXT"].iter().any(|t| declared.contains(t)) {
        "VARCHAR"
    } else if declared.contains("BLOB") || declared.trim().is_empty() {
        "BLOB"
    } else if ["REAL", "FLOA", "DOUB"].iter().any(|t| declared.contains(t)) {
        "DOUBLE"
    } else {
        "NUMERIC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool")
    }

    #[test]
    fn test_affinity() {
        assert_eq!(affinity("UNSIGNED BIG INT"), "INTEGER");
        assert_eq!(affinity("nvarchar(70)"), "VARCHAR");
        assert_eq!(affinity("CLOB"), "VARCHAR");
        assert_eq!(affinity(""), "BLOB");
        assert_eq!(affinity("DOUBLE PRECISION"), "DOUBLE");
        assert_eq!(affinity("DATETIME"), "NUMERIC");
        assert_eq!(affinity("FLOATING POINT"), "INTEGER");
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let pool = create_test_pool().await;
        sqlx::query(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, email VARCHAR(255) NOT NULL, \
             score UNSIGNED BIG INT, avatar, joined DATETIME)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("CREATE VIEW adults AS SELECT id, email FROM users")
            .execute(&pool)
            .await
            .unwrap();

        let catalog = load_catalog(&pool, &TypeRegistry::new()).await.unwrap();
        let names: Vec<_> = catalog.tables().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["adults", "users"]);

        let users = catalog.get("USERS").unwrap();
        assert_eq!(users.columns.len(), 5);

        let email = users.column("email").unwrap();
        assert_eq!(email.position, 1);
        assert_eq!(email.sql_type, sql_type::VARCHAR);
        assert_eq!(email.type_name, "VARCHAR(255)");

        assert_eq!(users.column("score").unwrap().sql_type, sql_type::INTEGER);
        assert_eq!(users.column("avatar").unwrap().sql_type, sql_type::BLOB);
        assert_eq!(users.column("avatar").unwrap().type_name, "BLOB");
        assert_eq!(users.column("joined").unwrap().sql_type, sql_type::NUMERIC);
        assert_eq!(
            catalog.get("adults").unwrap().column("email").unwrap().sql_type,
            sql_type::VARCHAR
        );
    }

    #[tokio::test]
    async fn test_empty_database() {
        let pool = create_test_pool().await;
        let catalog = load_catalog(&pool, &TypeRegistry::new()).await.unwrap();
        assert!(catalog.is_empty());
    }
}
