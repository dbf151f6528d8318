//! Format-specific file readers.
//!
//! Both formats normalize to a `RawTable` of string cells so schema
//! resolution and typed parsing are format-independent.

mod delimited;
mod workbook;

use epifund_common::LoadError;
use std::path::Path;

pub use delimited::read_csv;
pub use workbook::read_xlsx;

/// Header row plus raw data rows, straight from the file.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Dispatch on file extension.
pub fn read_table(path: &Path) -> Result<RawTable, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "csv" => read_csv(path),
        "xlsx" => read_xlsx(path),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.display().to_string(),
            extension,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = read_table(Path::new("report.pdf")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { extension, .. } if extension == "pdf"));
    }
}
