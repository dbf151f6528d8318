//! Grouped summary statistics over a Dataset.

use std::collections::BTreeMap;

use epifund_common::AggregationError;
use epifund_data::model::{Dataset, GroupKey, GroupValue, Record};
use tracing::instrument;

// ── Statistics ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    /// Sum of funding amounts
    Sum,
    /// Number of records
    Count,
    /// Mean funding amount
    Mean,
}

impl Statistic {
    /// Axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Statistic::Sum => "Total Funding (USD)",
            Statistic::Count => "Record Count",
            Statistic::Mean => "Average Funding (USD)",
        }
    }

    /// Whether the statistic reads the amount column (Count does not).
    fn needs_amount(&self) -> bool {
        !matches!(self, Statistic::Count)
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Request-scoped row filter. Year bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub funder: Option<String>,
    pub state: Option<String>,
}

impl Filter {
    /// Clamp requested year bounds into the dataset's actual range.
    /// Out-of-range requests thus fall back to real data instead of an
    /// empty result. A dataset with no dated records leaves bounds as-is.
    pub fn clamped(mut self, dataset: &Dataset) -> Filter {
        if let Some((min, max)) = dataset.year_bounds() {
            if let Some(from) = self.year_from {
                self.year_from = Some(from.clamp(min, max));
            }
            if let Some(to) = self.year_to {
                self.year_to = Some(to.clamp(min, max));
            }
            // An inverted range collapses to the lower bound
            if let (Some(from), Some(to)) = (self.year_from, self.year_to) {
                if from > to {
                    self.year_to = Some(from);
                }
            }
        }
        self
    }

    fn matches(&self, rec: &Record) -> bool {
        if self.year_from.is_some() || self.year_to.is_some() {
            // A record without a year cannot satisfy a year-bounded filter
            let Some(year) = rec.fiscal_year else {
                return false;
            };
            if self.year_from.is_some_and(|from| year < from) {
                return false;
            }
            if self.year_to.is_some_and(|to| year > to) {
                return false;
            }
        }
        if let Some(funder) = &self.funder {
            if rec.funder.as_deref() != Some(funder.as_str()) {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if rec.state.as_deref() != Some(state.as_str()) {
                return false;
            }
        }
        true
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Summary row for one distinct grouping value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub key: GroupValue,
    pub sum: f64,
    pub count: u64,
}

impl GroupSummary {
    pub fn value(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Sum => self.sum,
            Statistic::Count => self.count as f64,
            Statistic::Mean => {
                if self.count == 0 {
                    0.0
                } else {
                    self.sum / self.count as f64
                }
            }
        }
    }
}

/// Derived per-key summary. Replaced wholesale whenever the Dataset or the
/// filter changes, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub key: GroupKey,
    pub statistic: Statistic,
    /// One row per distinct non-null grouping value, ascending by key
    pub groups: Vec<GroupSummary>,
    /// Records excluded for a null grouping value or null measure
    pub excluded: u64,
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keep the `n` largest groups by statistic value, descending.
    pub fn top_n(mut self, n: usize) -> Aggregate {
        let statistic = self.statistic;
        self.groups
            .sort_by(|a, b| b.value(statistic).total_cmp(&a.value(statistic)));
        self.groups.truncate(n);
        self
    }

    /// Keep the `n` largest groups and fold the remainder into a trailing
    /// "Other" bucket, the way the original activity pie keeps the top five.
    pub fn top_n_with_other(mut self, n: usize, other_label: &str) -> Aggregate {
        let statistic = self.statistic;
        self.groups
            .sort_by(|a, b| b.value(statistic).total_cmp(&a.value(statistic)));
        if self.groups.len() > n {
            let rest = self.groups.split_off(n);
            let other = GroupSummary {
                key: GroupValue::Label(other_label.to_string()),
                sum: rest.iter().map(|g| g.sum).sum(),
                count: rest.iter().map(|g| g.count).sum(),
            };
            if other.count > 0 {
                self.groups.push(other);
            }
        }
        self
    }

    /// Trailing moving average of the statistic over the groups in their
    /// current order. Positions before the window fills are `None`.
    pub fn moving_average(&self, window: usize) -> Vec<Option<f64>> {
        let values: Vec<f64> = self.groups.iter().map(|g| g.value(self.statistic)).collect();
        values
            .iter()
            .enumerate()
            .map(|(i, _)| {
                if window == 0 || i + 1 < window {
                    None
                } else {
                    let slice = &values[i + 1 - window..=i];
                    Some(slice.iter().sum::<f64>() / window as f64)
                }
            })
            .collect()
    }
}

/// Group a Dataset by `key` and compute `statistic` per distinct value.
///
/// Records with a null grouping value — or a null amount when the statistic
/// reads amounts — are excluded from the statistic (never treated as zero)
/// and counted in `excluded`.
#[instrument(skip(dataset, filter), fields(source = %dataset.source))]
pub fn aggregate(
    dataset: &Dataset,
    key: GroupKey,
    statistic: Statistic,
    filter: &Filter,
) -> Result<Aggregate, AggregationError> {
    if !dataset.supports(key) {
        return Err(AggregationError::UnknownKey {
            key: key.as_str().to_string(),
            dataset: dataset.source.as_str().to_string(),
        });
    }

    let mut buckets: BTreeMap<GroupValue, GroupSummary> = BTreeMap::new();
    let mut excluded = 0u64;

    for rec in dataset.records.iter().filter(|r| filter.matches(r)) {
        let Some(group) = rec.group_value(key) else {
            excluded += 1;
            continue;
        };
        let amount = match (statistic.needs_amount(), rec.amount) {
            (true, None) => {
                excluded += 1;
                continue;
            }
            (true, Some(a)) => a,
            (false, a) => a.unwrap_or(0.0),
        };
        let entry = buckets.entry(group.clone()).or_insert(GroupSummary {
            key: group,
            sum: 0.0,
            count: 0,
        });
        entry.sum += amount;
        entry.count += 1;
    }

    Ok(Aggregate {
        key,
        statistic,
        groups: buckets.into_values().collect(),
        excluded,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
