//! Consolidated epilepsy funding master sheet (all funders, all years).

use epifund_common::DatasetSource;

use crate::schema::{ColumnSpec, ColumnType, SchemaDescriptor};

use super::{Binding, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        source: DatasetSource::FundingMaster,
        schema: SchemaDescriptor::new(vec![
            ColumnSpec::new("Award ID", ColumnType::Text),
            ColumnSpec::new("Funder", ColumnType::Text),
            ColumnSpec::new("Year", ColumnType::Year),
            ColumnSpec::new("Amount", ColumnType::Money),
            ColumnSpec::new("Condition", ColumnType::Text),
            ColumnSpec::new("Organization State", ColumnType::Text),
        ]),
        binding: Binding {
            id: "Award ID",
            fiscal_year: Some("Year"),
            date: None,
            amount: Some("Amount"),
            funder: Some("Funder"),
            category: Some("Condition"),
            state: Some("Organization State"),
            investigator: None,
        },
        baseline: None,
    }
}
