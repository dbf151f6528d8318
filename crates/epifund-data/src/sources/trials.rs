//! Epilepsy clinical-trial export (ClinicalTrials.gov derived).
//!
//! NCT ids identify rows; the lead sponsor stands in as the funder and the
//! studied condition as the category tag.

use epifund_common::DatasetSource;

use crate::schema::{ColumnSpec, ColumnType, SchemaDescriptor};

use super::{Binding, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        source: DatasetSource::ClinicalTrials,
        schema: SchemaDescriptor::new(vec![
            ColumnSpec::new("NCT ID", ColumnType::Text),
            ColumnSpec::new("Start Year", ColumnType::Year),
            ColumnSpec::new("Funding Amount", ColumnType::Money),
            ColumnSpec::new("Lead Sponsor", ColumnType::Text),
            ColumnSpec::new("Condition", ColumnType::Text),
            ColumnSpec::new("Phase", ColumnType::Text),
            ColumnSpec::new("Status", ColumnType::Text),
        ]),
        binding: Binding {
            id: "NCT ID",
            fiscal_year: Some("Start Year"),
            date: None,
            amount: Some("Funding Amount"),
            funder: Some("Lead Sponsor"),
            category: Some("Condition"),
            state: None,
            investigator: None,
        },
        baseline: None,
    }
}
