use super::mapping::{layout, Column};
use super::{CellValue, FieldError, RawRow};
use crate::workflows::refurbishment::domain::{
    HousingUnit, MilestoneDates, SatisfactionStatus, UnitNumber,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Two-digit-year forms come first; `%Y` would read "01-02-23" as year 1.
const DATE_FORMATS: &[&str] = &["%d-%m-%y", "%d/%m/%y", "%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Strips invisible characters and collapses runs of whitespace.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validates one sheet row into a unit, collecting every field error.
///
/// Cells missing from the end of a short row are read as empty.
pub fn normalize_row(row: &RawRow) -> Result<HousingUnit, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut unit_number = None;
    let mut court = None;
    let mut bedrooms = None;
    let mut extended = false;
    let mut area = 0.0;
    let mut milestones = MilestoneDates::default();
    let mut satisfaction_status = SatisfactionStatus::None;
    let mut comment = None;

    for (idx, column) in layout().into_iter().enumerate() {
        let cell = row.cells.get(idx).unwrap_or(&EMPTY_CELL);
        let outcome = match column {
            Column::UnitNumber => parse_unit_number(cell).map(|n| unit_number = Some(n)),
            Column::Court => parse_court(cell).map(|c| court = Some(c)),
            Column::Bedrooms => parse_bedrooms(cell).map(|(count, ext)| {
                bedrooms = Some(count);
                extended = ext;
            }),
            Column::Area => parse_area(cell).map(|a| area = a),
            Column::Date(milestone) => {
                parse_date_cell(cell, milestone.label()).map(|d| milestones.set(milestone, d))
            }
            Column::SatisfactionStatus => {
                satisfaction_status = match cell {
                    CellValue::Text(text) => SatisfactionStatus::from_name(text),
                    _ => SatisfactionStatus::None,
                };
                Ok(())
            }
            Column::Comment => {
                comment = match cell {
                    CellValue::Text(text) if !text.trim().is_empty() => {
                        Some(text.trim().to_string())
                    }
                    _ => None,
                };
                Ok(())
            }
        };

        if let Err(message) = outcome {
            errors.push(FieldError {
                field: column.field(),
                message,
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    match (unit_number, court, bedrooms) {
        (Some(unit_number), Some(court), Some(bedrooms)) => Ok(HousingUnit {
            unit_number,
            court,
            bedrooms,
            extended,
            area,
            milestones,
            satisfaction_status,
            comment,
        }),
        // Required columns push an error whenever they fail, so this is not reached.
        _ => Err(errors),
    }
}

fn whole_number(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn parse_unit_number(cell: &CellValue) -> Result<UnitNumber, String> {
    let parsed = match cell {
        CellValue::Number(value) => whole_number(*value),
        CellValue::Text(text) => text.trim().parse::<f64>().ok().and_then(whole_number),
        _ => None,
    };
    parsed
        .map(UnitNumber)
        .ok_or_else(|| "House No must be a number".to_string())
}

fn parse_court(cell: &CellValue) -> Result<String, String> {
    match cell {
        CellValue::Text(text) if !text.trim().is_empty() => Ok(normalize_text(text)),
        _ => Err("Court must be a string".to_string()),
    }
}

/// Bedroom counts may carry an `e` marker ("3e") for extended units.
fn parse_bedrooms(cell: &CellValue) -> Result<(u32, bool), String> {
    let parsed = match cell {
        CellValue::Number(value) => whole_number(*value).map(|count| (count, false)),
        CellValue::Text(text) => {
            let lowered = text.trim().to_ascii_lowercase();
            let extended = lowered.contains('e');
            lowered
                .replace('e', "")
                .trim()
                .parse::<u32>()
                .ok()
                .map(|count| (count, extended))
        }
        _ => None,
    };
    parsed.ok_or_else(|| "Bedrooms must be a number".to_string())
}

fn parse_area(cell: &CellValue) -> Result<f64, String> {
    match cell {
        CellValue::Empty => Ok(0.0),
        CellValue::Number(value) if value.is_finite() => Ok(*value),
        CellValue::Text(text) if text.trim().is_empty() => Ok(0.0),
        CellValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| "Area must be a number".to_string()),
        _ => Err("Area must be a number".to_string()),
    }
}

/// Empty cells and `N/A` are absent dates; anything else must parse.
fn parse_date_cell(cell: &CellValue, label: &str) -> Result<Option<NaiveDate>, String> {
    let invalid = || format!("\"{label}\" must be either empty or \"N/A\" or a date");

    match cell {
        CellValue::Empty => Ok(None),
        CellValue::Date(date) => Ok(Some(*date)),
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("N/A") {
                Ok(None)
            } else {
                parse_date(trimmed).map(Some).ok_or_else(invalid)
            }
        }
        CellValue::Number(_) | CellValue::Bool(_) => Err(invalid()),
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parse_date_accepts_sheet_formats() {
        assert_eq!(parse_date("2023-01-10"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("10-01-23"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("10/01/2023"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("2023-01-10T08:30:00Z"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("2023-01-10T23:59:00"), Some(date(2023, 1, 10)));
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2023-02-30"), None);
    }

    #[test]
    fn date_cells_distinguish_absent_from_invalid() {
        let label = "Date Completed Cleaning";
        assert_eq!(parse_date_cell(&CellValue::Empty, label), Ok(None));
        assert_eq!(parse_date_cell(&CellValue::Text(" n/a ".into()), label), Ok(None));
        assert_eq!(
            parse_date_cell(&CellValue::Date(date(2023, 4, 2)), label),
            Ok(Some(date(2023, 4, 2)))
        );
        assert_eq!(
            parse_date_cell(&CellValue::Text("pending".into()), label),
            Err("\"Date Completed Cleaning\" must be either empty or \"N/A\" or a date".to_string())
        );
        assert!(parse_date_cell(&CellValue::Number(45000.0), label).is_err());
    }

    #[test]
    fn bedrooms_marker_sets_extended() {
        assert_eq!(parse_bedrooms(&CellValue::Text("3e".into())), Ok((3, true)));
        assert_eq!(parse_bedrooms(&CellValue::Text("4".into())), Ok((4, false)));
        assert_eq!(parse_bedrooms(&CellValue::Number(2.0)), Ok((2, false)));
        assert!(parse_bedrooms(&CellValue::Text("three".into())).is_err());
        assert!(parse_bedrooms(&CellValue::Number(2.5)).is_err());
    }

    #[test]
    fn short_rows_report_the_missing_required_fields() {
        let row = RawRow {
            row: 2,
            cells: vec![CellValue::Number(12.0)],
        };

        let errors = normalize_row(&row).expect_err("court and bedrooms are missing");
        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: "court",
                    message: "Court must be a string".to_string(),
                },
                FieldError {
                    field: "bedrooms",
                    message: "Bedrooms must be a number".to_string(),
                },
            ]
        );
    }

    #[test]
    fn text_normalization_collapses_whitespace() {
        assert_eq!(normalize_text("\u{feff}Ferdaws   Court "), "Ferdaws Court");
    }
}
