//! Core data model: records, datasets, grouping keys.

use chrono::NaiveDate;
use epifund_common::DatasetSource;
use std::cmp::Ordering;

use crate::schema::SchemaDescriptor;

/// Column a dataset can be partitioned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    FiscalYear,
    Funder,
    State,
    Category,
    Investigator,
}

impl GroupKey {
    pub const ALL: [GroupKey; 5] = [
        GroupKey::FiscalYear,
        GroupKey::Funder,
        GroupKey::State,
        GroupKey::Category,
        GroupKey::Investigator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::FiscalYear => "fiscal_year",
            GroupKey::Funder => "funder",
            GroupKey::State => "state",
            GroupKey::Category => "category",
            GroupKey::Investigator => "investigator",
        }
    }

    /// Axis/heading label.
    pub fn label(&self) -> &'static str {
        match self {
            GroupKey::FiscalYear => "Fiscal Year",
            GroupKey::Funder => "Funder",
            GroupKey::State => "State",
            GroupKey::Category => "Activity / Condition",
            GroupKey::Investigator => "Principal Investigator",
        }
    }

    /// Chronological keys order ascending in charts; the rest order by value.
    pub fn is_chronological(&self) -> bool {
        matches!(self, GroupKey::FiscalYear)
    }

    pub fn parse(s: &str) -> Option<GroupKey> {
        match s {
            "fiscal_year" | "year" => Some(GroupKey::FiscalYear),
            "funder" => Some(GroupKey::Funder),
            "state" => Some(GroupKey::State),
            "category" | "activity" | "condition" => Some(GroupKey::Category),
            "investigator" | "pi" => Some(GroupKey::Investigator),
            _ => None,
        }
    }
}

/// A distinct value of a grouping column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupValue {
    Year(i32),
    Label(String),
}

impl GroupValue {
    pub fn label(&self) -> String {
        match self {
            GroupValue::Year(y) => y.to_string(),
            GroupValue::Label(s) => s.clone(),
        }
    }

    pub fn as_year(&self) -> Option<i32> {
        match self {
            GroupValue::Year(y) => Some(*y),
            _ => None,
        }
    }
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupValue::Year(a), GroupValue::Year(b)) => a.cmp(b),
            (GroupValue::Label(a), GroupValue::Label(b)) => a.cmp(b),
            (GroupValue::Year(_), GroupValue::Label(_)) => Ordering::Less,
            (GroupValue::Label(_), GroupValue::Year(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One funding/trial/venture row. Immutable once loaded; fields the source
/// does not carry stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub fiscal_year: Option<i32>,
    pub date: Option<NaiveDate>,
    /// Currency-normalized USD
    pub amount: Option<f64>,
    pub funder: Option<String>,
    /// Condition, indication, or NIH activity code depending on the source
    pub category: Option<String>,
    pub state: Option<String>,
    pub investigator: Option<String>,
    pub source: DatasetSource,
}

impl Record {
    /// Value of a grouping column for this record, or `None` when null.
    pub fn group_value(&self, key: GroupKey) -> Option<GroupValue> {
        match key {
            GroupKey::FiscalYear => self.fiscal_year.map(GroupValue::Year),
            GroupKey::Funder => self.funder.clone().map(GroupValue::Label),
            GroupKey::State => self.state.clone().map(GroupValue::Label),
            GroupKey::Category => self.category.clone().map(GroupValue::Label),
            GroupKey::Investigator => self.investigator.clone().map(GroupValue::Label),
        }
    }
}

/// Immutable in-memory table loaded from one source file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: DatasetSource,
    pub schema: SchemaDescriptor,
    /// Grouping keys this source's schema supports
    pub keys: Vec<GroupKey>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn supports(&self, key: GroupKey) -> bool {
        self.keys.contains(&key)
    }

    /// Min and max fiscal year across records with a year. Used to clamp
    /// out-of-range filter requests.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut bounds: Option<(i32, i32)> = None;
        for rec in &self.records {
            if let Some(y) = rec.fiscal_year {
                bounds = Some(match bounds {
                    None => (y, y),
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                });
            }
        }
        bounds
    }

    /// Distinct non-null values of a grouping column, sorted.
    pub fn distinct(&self, key: GroupKey) -> Vec<GroupValue> {
        let mut values: Vec<GroupValue> = self
            .records
            .iter()
            .filter_map(|r| r.group_value(key))
            .collect();
        values.sort();
        values.dedup();
        values
    }
}
