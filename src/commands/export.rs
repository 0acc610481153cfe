// ABOUTME: Implements the export command
// ABOUTME: Runs sequential per-table CSV exports with isolated failures

use crate::config::ExportConfig;
use crate::export::{export_table, ExportOutcome, ExportedFile};
use crate::mysql::{self, reader};
use anyhow::{bail, Context, Result};

/// Export every configured table to a CSV file in the output directory.
///
/// Tables are exported sequentially over one connection. Each table runs in
/// its own error boundary: a failed table is recorded and the run moves on
/// to the next one, so one bad table cannot abort its siblings. The command
/// exits non-zero if any table failed, after attempting all of them.
pub async fn export(config: &ExportConfig) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut conn = mysql::connect(config).await?;

    let tables = if config.tables.is_empty() {
        reader::list_tables(&mut conn, &config.database).await?
    } else {
        config.tables.clone()
    };

    if tables.is_empty() {
        println!("No tables to export in database '{}'", config.database);
        return Ok(());
    }

    tracing::info!(
        "Exporting {} table(s) from '{}' with batch size {}",
        tables.len(),
        config.database,
        config.batch_size
    );

    let mut outcomes: Vec<ExportOutcome> = Vec::with_capacity(tables.len());

    for table in &tables {
        let dest = config.output_dir.join(format!("{}.csv", table));
        let result = export_table(&mut conn, table, &dest, config.batch_size).await;

        match &result {
            Ok(rows) => println!("Wrote {} ({} rows)", dest.display(), rows),
            Err(e) => tracing::error!("Export of table '{}' failed: {}", table, e),
        }

        outcomes.push(ExportOutcome {
            table: table.clone(),
            result: result.map(|rows| ExportedFile { path: dest, rows }),
        });
    }

    conn.disconnect()
        .await
        .context("Failed to close MySQL connection")?;

    let failed: Vec<&ExportOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();

    println!(
        "Exported {}/{} table(s) to {}",
        outcomes.len() - failed.len(),
        outcomes.len(),
        config.output_dir.display()
    );

    if !failed.is_empty() {
        for outcome in &failed {
            if let Err(e) = &outcome.result {
                eprintln!("  {}: {}", outcome.table, e);
            }
        }
        bail!("{} of {} table exports failed", failed.len(), outcomes.len());
    }

    Ok(())
}
