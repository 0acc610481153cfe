// ABOUTME: Implements the list-tables command
// ABOUTME: Prints the base tables of the configured database

use crate::config::ExportConfig;
use crate::mysql::{self, reader};
use anyhow::{Context, Result};

/// Print the base tables of the configured database, one per line.
pub async fn list_tables(config: &ExportConfig) -> Result<()> {
    let mut conn = mysql::connect(config).await?;
    let tables = reader::list_tables(&mut conn, &config.database).await?;
    conn.disconnect()
        .await
        .context("Failed to close MySQL connection")?;

    if tables.is_empty() {
        println!("No base tables in database '{}'", config.database);
    } else {
        for table in &tables {
            println!("{}", table);
        }
    }

    Ok(())
}
