//! Turns one source file into an immutable Dataset.

use std::path::Path;

use epifund_common::LoadError;
use tracing::{debug, info, instrument};

use crate::model::{Dataset, Record};
use crate::readers::read_table;
use crate::schema::ResolvedSchema;
use crate::sources::SourceSpec;

/// Load a source file against its declared schema.
///
/// Deterministic and idempotent: the same file always yields the same
/// Dataset. No side effect beyond reading the file.
#[instrument(skip(spec), fields(source = %spec.source))]
pub fn load_dataset(path: &Path, spec: &SourceSpec) -> Result<Dataset, LoadError> {
    let table = read_table(path)?;
    let path_str = path.display().to_string();
    let resolved = spec.schema.resolve(&table.headers, &path_str)?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut dropped = 0usize;
    for (row_no, row) in table.rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let record = build_record(spec, &resolved, row, row_no, &path_str)?;
        match spec.baseline {
            Some(retain) if !retain(&record) => dropped += 1,
            _ => records.push(record),
        }
    }

    if dropped > 0 {
        debug!(dropped, "baseline filter dropped rows");
    }
    info!(rows = records.len(), path = %path_str, "dataset loaded");

    Ok(Dataset {
        source: spec.source,
        schema: spec.schema.clone(),
        keys: spec.binding.keys(),
        records,
    })
}

fn build_record(
    spec: &SourceSpec,
    resolved: &ResolvedSchema,
    row: &[String],
    row_no: usize,
    path: &str,
) -> Result<Record, LoadError> {
    let b = &spec.binding;

    let id = resolved.parse(b.id, row, row_no, path)?;
    let id = match id.is_null() {
        // A row without its identifier still counts; key it by position.
        true => format!("{}:{}", spec.source, row_no),
        false => id.display(),
    };

    let mut record = Record {
        id,
        fiscal_year: None,
        date: None,
        amount: None,
        funder: None,
        category: None,
        state: None,
        investigator: None,
        source: spec.source,
    };

    if let Some(col) = b.fiscal_year {
        record.fiscal_year = resolved
            .parse(col, row, row_no, path)?
            .as_i64()
            .map(|y| y as i32);
    }
    if let Some(col) = b.date {
        record.date = resolved.parse(col, row, row_no, path)?.as_date();
    }
    if let Some(col) = b.amount {
        record.amount = resolved.parse(col, row, row_no, path)?.as_f64();
    }
    if let Some(col) = b.funder {
        record.funder = resolved.parse(col, row, row_no, path)?.as_text().map(String::from);
    }
    if let Some(col) = b.category {
        record.category = resolved.parse(col, row, row_no, path)?.as_text().map(String::from);
    }
    if let Some(col) = b.state {
        record.state = resolved.parse(col, row, row_no, path)?.as_text().map(String::from);
    }
    if let Some(col) = b.investigator {
        record.investigator = resolved
            .parse(col, row, row_no, path)?
            .as_text()
            .map(String::from);
    }

    Ok(record)
}
