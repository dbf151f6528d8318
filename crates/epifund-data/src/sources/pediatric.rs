//! Pediatric-epilepsy grant spreadsheet.

use epifund_common::DatasetSource;

use crate::schema::{ColumnSpec, ColumnType, SchemaDescriptor};

use super::{Binding, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        source: DatasetSource::PediatricEpilepsy,
        schema: SchemaDescriptor::new(vec![
            ColumnSpec::new("Grant ID", ColumnType::Text),
            ColumnSpec::new("Fiscal Year", ColumnType::Year),
            ColumnSpec::new("Total Cost", ColumnType::Money),
            ColumnSpec::new("Funder", ColumnType::Text),
            ColumnSpec::new("Organization State", ColumnType::Text),
            ColumnSpec::new("Activity", ColumnType::Text),
            ColumnSpec::new("Contact PI", ColumnType::Text),
        ]),
        binding: Binding {
            id: "Grant ID",
            fiscal_year: Some("Fiscal Year"),
            date: None,
            amount: Some("Total Cost"),
            funder: Some("Funder"),
            category: Some("Activity"),
            state: Some("Organization State"),
            investigator: Some("Contact PI"),
        },
        baseline: None,
    }
}
