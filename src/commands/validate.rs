// ABOUTME: Implements the validate command
// ABOUTME: Checks connectivity, table existence, and output directory writability

use crate::config::ExportConfig;
use crate::mysql::{self, reader};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Check that an export run could succeed, without exporting anything.
///
/// Verifies the database connection, that every requested table exists as a
/// base table, and that the output directory exists and is writable.
pub async fn validate(config: &ExportConfig) -> Result<()> {
    let mut conn = mysql::connect(config).await?;
    println!(
        "Connection OK: {}:{}/{}",
        config.host, config.port, config.database
    );

    if config.tables.is_empty() {
        let tables = reader::list_tables(&mut conn, &config.database).await?;
        println!(
            "Tables OK: {} base table(s) found in '{}'",
            tables.len(),
            config.database
        );
    } else {
        let mut missing = Vec::new();
        for table in &config.tables {
            mysql::validate_table_name(table)?;
            if !reader::table_exists(&mut conn, &config.database, table).await? {
                missing.push(table.clone());
            }
        }
        if !missing.is_empty() {
            bail!(
                "Missing table(s) in database '{}': {}",
                config.database,
                missing.join(", ")
            );
        }
        println!("Tables OK: all {} table(s) exist", config.tables.len());
    }

    conn.disconnect()
        .await
        .context("Failed to close MySQL connection")?;

    check_output_dir(&config.output_dir)?;
    println!("Output directory OK: {}", config.output_dir.display());

    Ok(())
}

/// Confirm the output directory exists and accepts writes.
fn check_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        bail!("Output directory {} does not exist", dir.display());
    }
    if !dir.is_dir() {
        bail!("Output path {} is not a directory", dir.display());
    }

    let probe = dir.join(".mysql-csv-export-probe");
    std::fs::write(&probe, b"")
        .with_context(|| format!("Output directory {} is not writable", dir.display()))?;
    let _ = std::fs::remove_file(&probe);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writable_directory_passes() {
        let dir = TempDir::new().unwrap();
        assert!(check_output_dir(dir.path()).is_ok());
    }

    #[test]
    fn missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let result = check_output_dir(&missing);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn file_instead_of_directory_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let result = check_output_dir(&file);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }
}
