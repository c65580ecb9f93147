mod mapping;
mod normalizer;
mod parser;

pub use mapping::{template_headers, Column};
pub use normalizer::normalize_row;

use crate::config::ImportConfig;
use crate::workflows::refurbishment::domain::{HousingUnit, SubmissionStatus, UnitNumber};
use crate::workflows::refurbishment::status::submission_status;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Loosely typed cell as it arrives from a sheet or CSV export.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    pub fn from_text(value: &str) -> Self {
        let cleaned = normalizer::normalize_text(value);
        if cleaned.is_empty() {
            Self::Empty
        } else {
            Self::Text(cleaned)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// One data row, cells in sheet column order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Row number on the sheet (headers are row 1).
    pub row: usize,
    pub cells: Vec<CellValue>,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub row: usize,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedUnit {
    pub row: usize,
    pub unit: HousingUnit,
    pub submission_status: SubmissionStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub accepted: Vec<ImportedUnit>,
    pub rejected: Vec<RowRejection>,
}

impl ImportOutcome {
    pub fn units(&self) -> Vec<HousingUnit> {
        self.accepted.iter().map(|imported| imported.unit.clone()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Failures that abort the whole batch. Row-level problems are reported in
/// `ImportOutcome::rejected` instead.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read unit sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid unit sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no data found in the unit sheet")]
    NoRows,
    #[error("too many rows ({found}), please limit to {max} rows")]
    TooManyRows { found: usize, max: usize },
}

pub struct UnitImporter {
    config: ImportConfig,
}

impl Default for UnitImporter {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

impl UnitImporter {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<ImportOutcome, ImportError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<ImportOutcome, ImportError> {
        let rows = parser::parse_rows(reader)?;
        self.from_rows(rows)
    }

    /// Validates rows independently; a bad row never stops the batch.
    pub fn from_rows(&self, rows: Vec<RawRow>) -> Result<ImportOutcome, ImportError> {
        if rows.len() > self.config.max_rows {
            return Err(ImportError::TooManyRows {
                found: rows.len(),
                max: self.config.max_rows,
            });
        }

        let mut outcome = ImportOutcome::default();
        let mut seen: HashMap<UnitNumber, usize> = HashMap::new();

        for raw in rows.iter().filter(|raw| !raw.is_blank()) {
            match normalize_row(raw) {
                Ok(unit) => {
                    if let Some(first_row) = seen.get(&unit.unit_number) {
                        reject(
                            &mut outcome,
                            raw.row,
                            vec![FieldError {
                                field: Column::UnitNumber.field(),
                                message: format!(
                                    "House No {} already appears in row {}",
                                    unit.unit_number, first_row
                                ),
                            }],
                        );
                        continue;
                    }

                    seen.insert(unit.unit_number, raw.row);
                    let status = submission_status(&unit);
                    outcome.accepted.push(ImportedUnit {
                        row: raw.row,
                        unit,
                        submission_status: status,
                    });
                }
                Err(errors) => reject(&mut outcome, raw.row, errors),
            }
        }

        if outcome.accepted.is_empty() && outcome.rejected.is_empty() {
            return Err(ImportError::NoRows);
        }

        tracing::info!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            "unit import finished"
        );

        Ok(outcome)
    }
}

fn reject(outcome: &mut ImportOutcome, row: usize, errors: Vec<FieldError>) {
    tracing::debug!(row, errors = ?errors, "rejected unit row");
    outcome.rejected.push(RowRejection { row, errors });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "House No.,Court,BR No.,Area,\
        D1,D2,D3,D4,D5,D6,D7,D8,D9,D10,D11,D12,D13,D14,\
        Satisfaction,Comment\n";

    #[test]
    fn from_path_propagates_io_errors() {
        let error = UnitImporter::default()
            .from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            ImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn blank_rows_are_skipped_and_all_blank_is_no_rows() {
        let csv = format!("{HEADER},,,,,,,,,,,,,,,,,,,\n");
        let error = UnitImporter::default()
            .from_reader(Cursor::new(csv))
            .expect_err("blank sheet rejected");
        assert!(matches!(error, ImportError::NoRows));
    }

    #[test]
    fn row_cap_is_fatal() {
        let csv = format!("{HEADER}1,Rawda,2\n2,Rawda,2\n3,Rawda,2\n");
        let importer = UnitImporter::new(ImportConfig { max_rows: 2 });
        match importer.from_reader(Cursor::new(csv)) {
            Err(ImportError::TooManyRows { found: 3, max: 2 }) => {}
            other => panic!("expected row cap error, got {other:?}"),
        }
    }

    #[test]
    fn short_caller_rows_are_rejected_with_field_messages() {
        let outcome = UnitImporter::default()
            .from_rows(vec![RawRow {
                row: 2,
                cells: vec![CellValue::Number(12.0)],
            }])
            .expect("batch readable");

        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected.len(), 1);
        let fields: Vec<&str> = outcome.rejected[0]
            .errors
            .iter()
            .map(|error| error.field)
            .collect();
        assert_eq!(fields, vec!["court", "bedrooms"]);
    }

    #[test]
    fn typed_cells_are_accepted() {
        let mut cells = vec![CellValue::Empty; mapping::COLUMN_COUNT];
        cells[0] = CellValue::Number(44.0);
        cells[1] = CellValue::Text("Rawda".into());
        cells[2] = CellValue::Number(3.0);
        cells[6] = CellValue::Date(NaiveDate::from_ymd_opt(2023, 2, 1).expect("valid"));

        let outcome = UnitImporter::default()
            .from_rows(vec![RawRow { row: 2, cells }])
            .expect("import succeeds");
        assert!(outcome.is_clean());
        assert_eq!(
            outcome.accepted[0].submission_status,
            SubmissionStatus::PendingCleaningSubmission
        );
    }
}
