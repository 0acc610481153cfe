// ABOUTME: Streaming export of one MySQL table to one CSV file
// ABOUTME: Fetches rows in fixed-size batches so peak memory stays bounded

use crate::mysql::converter::value_to_field;
use mysql_async::prelude::*;
use mysql_async::{Conn, Row, Value};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from a single table export
#[derive(Debug, Error)]
pub enum ExportError {
    /// Table name failed validation and was never sent to the server
    #[error("invalid table name '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// Query execution or row fetch failed; no usable output file remains
    #[error("failed to query table '{table}': {source}")]
    Query {
        table: String,
        #[source]
        source: mysql_async::Error,
    },

    /// A fetched row was missing a column the metadata promised
    #[error("failed to decode row {row} of table '{table}' at column {column}")]
    Decode {
        table: String,
        row: u64,
        column: usize,
    },

    /// Destination file could not be created or written
    #[error("failed to write CSV file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result record for one table in an export run
#[derive(Debug)]
pub struct ExportOutcome {
    pub table: String,
    pub result: Result<ExportedFile, ExportError>,
}

/// A completed table export
#[derive(Debug)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub rows: u64,
}

/// Export one table's full contents to a CSV file
///
/// Executes `SELECT * FROM` the table, takes the column list from the query
/// result metadata, writes a header line, then streams all rows into the
/// file buffering at most `batch_size` decoded rows at a time. Rows appear
/// in cursor order; no filter, ordering, or limit is applied.
///
/// The destination is created (truncating any previous file) only after the
/// query has executed, so a query failure leaves nothing on disk. If a fetch
/// or write fails after the file exists, the partial file is removed
/// best-effort before the error is returned.
///
/// Returns the number of data rows written.
pub async fn export_table(
    conn: &mut Conn,
    table: &str,
    dest: &Path,
    batch_size: usize,
) -> Result<u64, ExportError> {
    crate::mysql::validate_table_name(table).map_err(|e| ExportError::InvalidTable {
        table: table.to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!("Exporting table '{}' to {}", table, dest.display());

    let query = format!("SELECT * FROM `{}`", table);
    let mut result = conn
        .query_iter(query)
        .await
        .map_err(|source| ExportError::Query {
            table: table.to_string(),
            source,
        })?;

    let columns: Vec<String> = result
        .columns()
        .map(|cols| cols.iter().map(|c| c.name_str().into_owned()).collect())
        .unwrap_or_default();

    let mut sink = CsvSink::create(dest)?;

    match stream_rows(&mut result, &mut sink, &columns, table, batch_size).await {
        Ok(total) => {
            sink.finish()?;
            tracing::info!("Wrote {} row(s) from table '{}'", total, table);
            Ok(total)
        }
        Err(e) => {
            // A half-written file must not be mistaken for a completed export
            sink.discard();
            Err(e)
        }
    }
}

/// Fetch all rows from the cursor into the sink, batch by batch
async fn stream_rows(
    result: &mut mysql_async::QueryResult<'_, 'static, mysql_async::TextProtocol>,
    sink: &mut CsvSink,
    columns: &[String],
    table: &str,
    batch_size: usize,
) -> Result<u64, ExportError> {
    sink.write_header(columns)?;

    let mut batch: Vec<Vec<String>> = Vec::new();
    let mut total = 0u64;

    loop {
        let row = result.next().await.map_err(|source| ExportError::Query {
            table: table.to_string(),
            source,
        })?;
        let Some(row) = row else { break };

        batch.push(decode_row(row, columns.len(), table, total)?);
        total += 1;

        if batch.len() >= batch_size {
            sink.append_batch(&mut batch)?;
        }
    }

    // Final partial batch, or nothing for row counts that divide evenly
    sink.append_batch(&mut batch)?;

    Ok(total)
}

/// Decode a fetched row into CSV fields, one per column
fn decode_row(
    row: Row,
    column_count: usize,
    table: &str,
    row_index: u64,
) -> Result<Vec<String>, ExportError> {
    let mut fields = Vec::with_capacity(column_count);
    for idx in 0..column_count {
        let value: Value = row.get(idx).ok_or_else(|| ExportError::Decode {
            table: table.to_string(),
            row: row_index,
            column: idx,
        })?;
        fields.push(value_to_field(&value));
    }
    Ok(fields)
}

/// CSV output file with standard quoting, removed on failure
struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvSink {
    fn create(path: &Path) -> Result<Self, ExportError> {
        let writer = csv::Writer::from_path(path).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(CsvSink {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn write_header(&mut self, columns: &[String]) -> Result<(), ExportError> {
        self.writer
            .write_record(columns)
            .map_err(|source| ExportError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Append and drain one batch of decoded rows
    fn append_batch(&mut self, batch: &mut Vec<Vec<String>>) -> Result<(), ExportError> {
        for record in batch.drain(..) {
            self.writer
                .write_record(&record)
                .map_err(|source| ExportError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Flush all buffered writes to storage, removing the file on failure
    fn finish(mut self) -> Result<(), ExportError> {
        if let Err(source) = self.writer.flush() {
            let path = self.path.clone();
            self.discard();
            return Err(ExportError::Write {
                path,
                source: csv::Error::from(source),
            });
        }
        Ok(())
    }

    /// Drop the file handle and remove the partial file, best-effort
    fn discard(self) {
        drop(self.writer);
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                "Failed to remove partial file {}: {}",
                self.path.display(),
                e
            );
        } else {
            tracing::debug!("Removed partial file {}", self.path.display());
        }
    }
}
