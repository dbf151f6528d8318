//! CSV reader.

use epifund_common::LoadError;
use std::path::Path;

use super::RawTable;

pub fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::Csv {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(LoadError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Csv {
            path: path.display().to_string(),
            message: format!("row {row_no}: {e}"),
        })?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}
