//! Venture funding rounds from the Pitchbook export.

use epifund_common::DatasetSource;

use crate::schema::{ColumnSpec, ColumnType, SchemaDescriptor};

use super::{Binding, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        source: DatasetSource::Pitchbook,
        schema: SchemaDescriptor::new(vec![
            ColumnSpec::new("Deal ID", ColumnType::Text),
            ColumnSpec::new("Year", ColumnType::Year),
            ColumnSpec::new("Deal Size", ColumnType::Money),
            ColumnSpec::new("Investor", ColumnType::Text),
            ColumnSpec::new("Company", ColumnType::Text),
            ColumnSpec::new("Indication", ColumnType::Text),
        ]),
        binding: Binding {
            id: "Deal ID",
            fiscal_year: Some("Year"),
            date: None,
            amount: Some("Deal Size"),
            funder: Some("Investor"),
            category: Some("Indication"),
            state: None,
            investigator: None,
        },
        baseline: None,
    }
}
