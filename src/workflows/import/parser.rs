use super::mapping::COLUMN_COUNT;
use super::{CellValue, RawRow};
use std::io::Read;

/// First data row's number on the sheet; row 1 holds the headers.
const FIRST_DATA_ROW: usize = 2;

/// Reads every data row of a CSV export, keeping cells as text.
///
/// Columns are taken by position; short rows are padded with empty cells.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let mut cells: Vec<CellValue> = record
            .iter()
            .take(COLUMN_COUNT)
            .map(CellValue::from_text)
            .collect();
        cells.resize(COLUMN_COUNT, CellValue::Empty);

        rows.push(RawRow {
            row: FIRST_DATA_ROW + idx,
            cells,
        });
    }

    Ok(rows)
}
