//! Bulk CSV import of properties and their locations.

mod importer;
mod row;

pub use importer::{import_file, RowStatus};

#[cfg(test)]
pub use importer::import_csv;
