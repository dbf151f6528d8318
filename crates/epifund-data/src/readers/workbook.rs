//! xlsx reader via calamine. First worksheet, first row as headers.

use calamine::{open_workbook, Data, Reader, Xlsx};
use epifund_common::LoadError;
use std::path::Path;

use super::RawTable;

pub fn read_xlsx(path: &Path) -> Result<RawTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| LoadError::Workbook {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::EmptyFile {
            path: path.display().to_string(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Workbook {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| LoadError::EmptyFile {
            path: path.display().to_string(),
        })?
        .iter()
        .map(cell_to_string)
        .collect();

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

/// Normalize a workbook cell to the string form the typed parser expects.
/// Whole floats print without the trailing `.0` spreadsheets love to add
/// to year and id columns.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR {e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_floats_lose_the_decimal() {
        assert_eq!(cell_to_string(&Data::Float(2019.0)), "2019");
        assert_eq!(cell_to_string(&Data::Float(0.5)), "0.5");
    }

    #[test]
    fn test_empty_cell_is_empty_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = read_xlsx(Path::new("/nonexistent/funding.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }
}
