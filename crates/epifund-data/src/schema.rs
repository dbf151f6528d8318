//! Explicit schema descriptors and typed cell values.
//!
//! Every source file declares an ordered list of (column name, type). The
//! header row is resolved by name, so column order may vary between exports
//! of the same dataset, but a renamed column is a schema mismatch.

use chrono::NaiveDate;
use epifund_common::LoadError;

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Whole-number identifier or count
    Integer,
    /// Four-digit fiscal/calendar year
    Year,
    /// Currency-normalized USD amount ("$1,234,567.89" accepted)
    Money,
    Float,
    Text,
    /// Full date, `%Y-%m-%d` or `%m/%d/%Y`
    Date,
}

impl ColumnType {
    pub fn expected(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Year => "year",
            ColumnType::Money => "money",
            ColumnType::Float => "number",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty }
    }
}

/// Ordered column declaration for one source file.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    columns: Vec<ColumnSpec>,
}

impl SchemaDescriptor {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Match every declared column against the file's header row.
    /// Fails fast with `LoadError::MissingColumn` on the first absent column.
    pub fn resolve(&self, headers: &[String], path: &str) -> Result<ResolvedSchema, LoadError> {
        let mut cols = Vec::with_capacity(self.columns.len());
        for spec in &self.columns {
            let idx = headers
                .iter()
                .position(|h| h.trim() == spec.name)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_string(),
                    column: spec.name.to_string(),
                })?;
            cols.push((spec.clone(), idx));
        }
        Ok(ResolvedSchema { cols })
    }
}

/// A schema bound to the actual header positions of one file.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    cols: Vec<(ColumnSpec, usize)>,
}

impl ResolvedSchema {
    /// Parse the named column out of a raw row. Cells beyond the row's end
    /// (trailing blanks some writers drop) read as null.
    pub fn parse(
        &self,
        name: &str,
        row: &[String],
        row_no: usize,
        path: &str,
    ) -> Result<Value, LoadError> {
        let (spec, idx) = self
            .cols
            .iter()
            .find(|(c, _)| c.name == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_string(),
                column: name.to_string(),
            })?;
        let raw = row.get(*idx).map(String::as_str).unwrap_or("");
        Value::parse(raw, spec.ty).map_err(|value| LoadError::BadCell {
            path: path.to_string(),
            row: row_no,
            column: spec.name.to_string(),
            expected: spec.ty.expected(),
            value,
        })
    }
}

// ── Typed cell values ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Value {
    /// Parse a raw cell against a declared type. Empty cells are null for
    /// every type; a non-empty cell that fails its type is an error carrying
    /// the offending text.
    pub fn parse(raw: &str, ty: ColumnType) -> Result<Value, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        match ty {
            ColumnType::Integer | ColumnType::Year => parse_int(trimmed)
                .map(Value::Int)
                .ok_or_else(|| trimmed.to_string()),
            ColumnType::Money | ColumnType::Float => parse_number(trimmed)
                .map(Value::Float)
                .ok_or_else(|| trimmed.to_string()),
            ColumnType::Text => Ok(Value::Text(trimmed.to_string())),
            ColumnType::Date => parse_date(trimmed)
                .map(Value::Date)
                .ok_or_else(|| trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Display form used for record identifiers.
    pub fn display(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.to_string(),
            Value::Null => String::new(),
        }
    }
}

/// Integers sometimes arrive as "2019.0" from spreadsheet exports.
fn parse_int(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.trim().parse::<f64>().ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_tolerates_column_order() {
        let schema = SchemaDescriptor::new(vec![
            ColumnSpec::new("Year", ColumnType::Year),
            ColumnSpec::new("Amount", ColumnType::Money),
        ]);
        let resolved = schema
            .resolve(&headers(&["Amount", "Extra", "Year"]), "t.csv")
            .unwrap();
        let row = headers(&["$5,000", "x", "2021"]);
        assert_eq!(
            resolved.parse("Year", &row, 0, "t.csv").unwrap(),
            Value::Int(2021)
        );
        assert_eq!(
            resolved.parse("Amount", &row, 0, "t.csv").unwrap(),
            Value::Float(5000.0)
        );
    }

    #[test]
    fn test_resolve_rejects_renamed_column() {
        let schema = SchemaDescriptor::new(vec![ColumnSpec::new("Funder", ColumnType::Text)]);
        let err = schema
            .resolve(&headers(&["Sponsor"]), "t.csv")
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column, .. } if column == "Funder"));
    }

    #[test]
    fn test_money_parsing_strips_currency_noise() {
        assert_eq!(
            Value::parse("$1,234,567.89", ColumnType::Money).unwrap(),
            Value::Float(1_234_567.89)
        );
    }

    #[test]
    fn test_empty_cell_is_null_not_zero() {
        assert_eq!(Value::parse("  ", ColumnType::Money).unwrap(), Value::Null);
        assert_eq!(Value::parse("", ColumnType::Year).unwrap(), Value::Null);
    }

    #[test]
    fn test_non_numeric_amount_is_an_error() {
        let err = Value::parse("pending", ColumnType::Money).unwrap_err();
        assert_eq!(err, "pending");
    }

    #[test]
    fn test_year_accepts_spreadsheet_floats() {
        assert_eq!(Value::parse("2019.0", ColumnType::Year).unwrap(), Value::Int(2019));
        assert!(Value::parse("2019.5", ColumnType::Year).is_err());
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert_eq!(
            Value::parse("2021-03-15", ColumnType::Date).unwrap(),
            Value::Date(expected)
        );
        assert_eq!(
            Value::parse("03/15/2021", ColumnType::Date).unwrap(),
            Value::Date(expected)
        );
    }
}
