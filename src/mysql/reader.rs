// ABOUTME: MySQL table discovery for export runs
// ABOUTME: Queries INFORMATION_SCHEMA for base tables and existence checks

use anyhow::{Context, Result};
use mysql_async::{prelude::*, Conn};

/// List all base tables in a MySQL database
///
/// Queries INFORMATION_SCHEMA, excluding views and system tables. Returns
/// tables in alphabetical order so an export run over "all tables" is
/// deterministic.
///
/// # Examples
///
/// ```no_run
/// # use mysql_csv_export::mysql::reader::list_tables;
/// # async fn example(mut conn: mysql_async::Conn) -> anyhow::Result<()> {
/// let tables = list_tables(&mut conn, "pharmacy").await?;
/// println!("Found {} tables", tables.len());
/// # Ok(())
/// # }
/// ```
pub async fn list_tables(conn: &mut Conn, db_name: &str) -> Result<Vec<String>> {
    tracing::info!("Listing tables from MySQL database '{}'", db_name);

    let query = r#"
        SELECT TABLE_NAME
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ?
        AND TABLE_TYPE = 'BASE TABLE'
        ORDER BY TABLE_NAME
    "#;

    let tables: Vec<String> = conn
        .exec(query, (db_name,))
        .await
        .with_context(|| format!("Failed to list tables from database '{}'", db_name))?;

    tracing::info!("Found {} table(s) in database '{}'", tables.len(), db_name);

    Ok(tables)
}

/// Check whether a base table exists in a MySQL database
pub async fn table_exists(conn: &mut Conn, db_name: &str, table_name: &str) -> Result<bool> {
    let query = r#"
        SELECT COUNT(*)
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ?
        AND TABLE_NAME = ?
        AND TABLE_TYPE = 'BASE TABLE'
    "#;

    let count: Option<u64> = conn
        .exec_first(query, (db_name, table_name))
        .await
        .with_context(|| format!("Failed to check existence of table '{}'", table_name))?;

    Ok(count.unwrap_or(0) > 0)
}
