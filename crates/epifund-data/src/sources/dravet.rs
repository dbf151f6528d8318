//! NIH Dravet-syndrome award export, 2014–2024.
//!
//! Column names follow the NIH RePORTER CSV export. Rows with a zero fiscal
//! year are administrative placeholders and are dropped at load time.

use epifund_common::DatasetSource;

use crate::schema::{ColumnSpec, ColumnType, SchemaDescriptor};

use super::{Binding, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        source: DatasetSource::DravetSyndrome,
        schema: SchemaDescriptor::new(vec![
            ColumnSpec::new("Application ID", ColumnType::Integer),
            ColumnSpec::new("Fiscal Year", ColumnType::Year),
            ColumnSpec::new("Total Cost", ColumnType::Money),
            ColumnSpec::new("Administering IC", ColumnType::Text),
            ColumnSpec::new("Organization State", ColumnType::Text),
            ColumnSpec::new("Activity", ColumnType::Text),
            ColumnSpec::new("Contact PI / Project Leader", ColumnType::Text),
            ColumnSpec::new("Award Notice Date", ColumnType::Date),
        ]),
        binding: Binding {
            id: "Application ID",
            fiscal_year: Some("Fiscal Year"),
            date: Some("Award Notice Date"),
            amount: Some("Total Cost"),
            funder: Some("Administering IC"),
            category: Some("Activity"),
            state: Some("Organization State"),
            investigator: Some("Contact PI / Project Leader"),
        },
        baseline: Some(|r| r.fiscal_year != Some(0)),
    }
}
