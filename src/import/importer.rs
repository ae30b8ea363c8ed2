// src/import/importer.rs

use crate::db::connection::{write_tx, Database};
use crate::db::locations::get_or_create_location;
use crate::db::properties::{
    find_property_id_by_title_and_location, insert_property, update_property,
};
use crate::errors::ServerError;
use crate::import::row::{Columns, ImportRow, RawRow};
use chrono::Utc;
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures that stop an import before any row is processed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error reading CSV file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error reading CSV file {}: input is not valid UTF-8", .0.display())]
    NotUtf8(PathBuf),
    #[error("Error reading CSV header: {0}")]
    Header(#[from] csv::Error),
    #[error(transparent)]
    Store(#[from] ServerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Created { property_id: i64 },
    Updated { property_id: i64 },
    Error,
}

/// What happened to one input row. `row` is the 1-based line of the
/// record in the file; the header is row 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub row: usize,
    pub status: RowStatus,
    pub message: String,
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
    pub rows: Vec<RowOutcome>,
}

impl ImportSummary {
    fn record(&mut self, outcome: RowOutcome) {
        match outcome.status {
            RowStatus::Created { .. } => self.created += 1,
            RowStatus::Updated { .. } => self.updated += 1,
            RowStatus::Error => self.errors += 1,
        }
        self.rows.push(outcome);
    }
}

/// Reads a CSV file and imports it into `db`.
///
/// The whole file is read and checked for UTF-8 up front, so a missing or
/// undecodable file fails the run before any row is written.
pub fn import_file(
    db: &Database,
    path: &Path,
    skip_location: bool,
) -> Result<ImportSummary, ImportError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImportError::NotFound(path.to_path_buf()),
        _ => ImportError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ImportError::NotUtf8(path.to_path_buf()))?;

    tracing::info!(path = %path.display(), skip_location, "starting import");

    let summary = db.with_conn(|conn| Ok(import_csv(conn, &text, skip_location)))??;
    Ok(summary)
}

/// Imports every record of `input`. Rows are independent: each one runs
/// in its own transaction and a failure is recorded, never propagated.
/// Only an unreadable header aborts the run.
pub fn import_csv(
    conn: &mut Connection,
    input: &str,
    skip_location: bool,
) -> Result<ImportSummary, ImportError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(input.as_bytes());
    let columns = Columns::from_headers(reader.headers()?);

    let mut summary = ImportSummary::default();
    let mut record = StringRecord::new();
    let mut row_num = 1;

    loop {
        row_num += 1;
        let outcome = match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let raw = RawRow::from_record(&columns, &record);
                import_row(conn, row_num, &raw, skip_location)
            }
            Err(e) => RowOutcome {
                row: row_num,
                status: RowStatus::Error,
                message: format!("Error processing row - {e}"),
            },
        };

        match outcome.status {
            RowStatus::Error => tracing::warn!(row = row_num, message = %outcome.message, "row skipped"),
            _ => tracing::debug!(row = row_num, message = %outcome.message, "row imported"),
        }
        summary.record(outcome);
    }

    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        errors = summary.errors,
        "import finished"
    );
    Ok(summary)
}

fn import_row(conn: &mut Connection, row: usize, raw: &RawRow, skip_location: bool) -> RowOutcome {
    let decoded = match ImportRow::decode(raw, skip_location) {
        Ok(decoded) => decoded,
        Err(e) => {
            return RowOutcome {
                row,
                status: RowStatus::Error,
                message: e.to_string(),
            }
        }
    };

    match apply_row(conn, &decoded) {
        Ok(status) => {
            let message = match status {
                RowStatus::Updated { .. } => format!("Updated property \"{}\"", decoded.title),
                _ if decoded.location.is_none() => format!(
                    "Created property \"{}\" (location needed in admin)",
                    decoded.title
                ),
                _ => format!("Created property \"{}\"", decoded.title),
            };
            RowOutcome {
                row,
                status,
                message,
            }
        }
        Err(e) => RowOutcome {
            row,
            status: RowStatus::Error,
            message: format!("Error processing row - {e}"),
        },
    }
}

/// Writes one decoded row. With a location the (title, location) pair
/// decides between update and create; without one the property is always
/// new, since there is nothing to match it on.
fn apply_row(conn: &mut Connection, row: &ImportRow) -> Result<RowStatus, ServerError> {
    let now = Utc::now().naive_utc();
    let tx = write_tx(conn)?;

    let location_id = match &row.location {
        Some(new_location) => {
            let (location, created) = get_or_create_location(&tx, new_location, now)?;
            if created {
                tracing::info!(location_id = location.id, name = %location.name, "created location");
            }
            Some(location.id)
        }
        None => None,
    };

    let fields = row.property_fields(location_id);
    let existing = match location_id {
        Some(location_id) => find_property_id_by_title_and_location(&tx, &row.title, location_id)?,
        None => None,
    };

    let status = match existing {
        Some(property_id) => {
            update_property(&tx, property_id, &fields, now)?;
            RowStatus::Updated { property_id }
        }
        None => RowStatus::Created {
            property_id: insert_property(&tx, &fields, now)?,
        },
    };

    tx.commit()?;
    Ok(status)
}
