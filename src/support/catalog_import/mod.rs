//! CSV import for the intervention catalog, so a shared spreadsheet export
//! can seed or refresh the in-memory catalog.

mod mapping;
mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::{CatalogEntry, CatalogEntryId, ValidationError};

/// Error raised while importing a catalog CSV export. Row numbers are
/// 1-based data rows, excluding the header.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown intervention kind '{kind}'")]
    UnknownInterventionKind { row: usize, kind: String },
    #[error("row {row}: unknown difficulty kind '{kind}'")]
    UnknownDifficultyKind { row: usize, kind: String },
    #[error("row {row}: invalid suggested duration '{value}'")]
    InvalidDuration { row: usize, value: String },
    #[error("row {row}: {source}")]
    InvalidEntry { row: usize, source: ValidationError },
}

pub struct CatalogCsvImporter;

impl CatalogCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogEntry>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogImportError> {
        let mut entries = Vec::new();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            let row_number = index + 1;

            let kind = mapping::intervention_kind(&row.kind).ok_or_else(|| {
                CatalogImportError::UnknownInterventionKind {
                    row: row_number,
                    kind: row.kind.clone(),
                }
            })?;

            let mut target_kinds = Vec::new();
            for raw in &row.target_kinds {
                let target = mapping::difficulty_kind(raw).ok_or_else(|| {
                    CatalogImportError::UnknownDifficultyKind {
                        row: row_number,
                        kind: raw.clone(),
                    }
                })?;
                if !target_kinds.contains(&target) {
                    target_kinds.push(target);
                }
            }

            let suggested_duration_days = row
                .suggested_duration_days
                .as_deref()
                .map(|value| {
                    value
                        .parse::<u32>()
                        .map_err(|_| CatalogImportError::InvalidDuration {
                            row: row_number,
                            value: value.to_string(),
                        })
                })
                .transpose()?;

            let entry = CatalogEntry::create(
                CatalogEntryId(format!("cat-{row_number:03}")),
                row.title,
                row.description,
                kind,
                suggested_duration_days,
                target_kinds,
                row.target_audiences,
                row.resources,
            )
            .map_err(|source| CatalogImportError::InvalidEntry {
                row: row_number,
                source,
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }
}
