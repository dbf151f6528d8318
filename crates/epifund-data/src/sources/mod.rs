//! One module per source file.
//!
//! Each source declares its schema, how schema columns bind to `Record`
//! fields, and any baseline row filter applied at load time.

pub mod dravet;
pub mod funding_master;
pub mod pediatric;
pub mod pitchbook;
pub mod trials;

use epifund_common::DatasetSource;

use crate::model::GroupKey;
use crate::schema::SchemaDescriptor;

/// Names of the schema columns feeding each `Record` field. `None` means
/// the source does not carry that attribute.
#[derive(Debug, Clone)]
pub struct Binding {
    pub id: &'static str,
    pub fiscal_year: Option<&'static str>,
    pub date: Option<&'static str>,
    pub amount: Option<&'static str>,
    pub funder: Option<&'static str>,
    pub category: Option<&'static str>,
    pub state: Option<&'static str>,
    pub investigator: Option<&'static str>,
}

impl Binding {
    /// Grouping keys this binding supports.
    pub fn keys(&self) -> Vec<GroupKey> {
        let mut keys = Vec::new();
        if self.fiscal_year.is_some() {
            keys.push(GroupKey::FiscalYear);
        }
        if self.funder.is_some() {
            keys.push(GroupKey::Funder);
        }
        if self.state.is_some() {
            keys.push(GroupKey::State);
        }
        if self.category.is_some() {
            keys.push(GroupKey::Category);
        }
        if self.investigator.is_some() {
            keys.push(GroupKey::Investigator);
        }
        keys
    }
}

/// Everything the loader needs to turn one file into a Dataset.
pub struct SourceSpec {
    pub source: DatasetSource,
    pub schema: SchemaDescriptor,
    pub binding: Binding,
    /// Rows failing this predicate are dropped at load time.
    pub baseline: Option<fn(&crate::model::Record) -> bool>,
}

pub fn spec_for(source: DatasetSource) -> SourceSpec {
    match source {
        DatasetSource::PediatricEpilepsy => pediatric::spec(),
        DatasetSource::ClinicalTrials => trials::spec(),
        DatasetSource::FundingMaster => funding_master::spec(),
        DatasetSource::DravetSyndrome => dravet::spec(),
        DatasetSource::Pitchbook => pitchbook::spec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_has_a_spec() {
        for source in DatasetSource::ALL {
            let spec = spec_for(source);
            assert_eq!(spec.source, source);
            assert!(!spec.schema.columns().is_empty());
        }
    }

    #[test]
    fn test_bindings_reference_declared_columns() {
        for source in DatasetSource::ALL {
            let spec = spec_for(source);
            let b = &spec.binding;
            let bound = [
                Some(b.id),
                b.fiscal_year,
                b.date,
                b.amount,
                b.funder,
                b.category,
                b.state,
                b.investigator,
            ];
            for name in bound.into_iter().flatten() {
                assert!(
                    spec.schema.contains(name),
                    "{source}: bound column \"{name}\" missing from schema"
                );
            }
        }
    }

    #[test]
    fn test_every_source_groups_by_year_and_amount() {
        for source in DatasetSource::ALL {
            let spec = spec_for(source);
            assert!(spec.binding.keys().contains(&GroupKey::FiscalYear));
            assert!(spec.binding.amount.is_some());
        }
    }
}
