//! Renderer-agnostic chart specifications.
//!
//! A ChartSpec is derived purely from an Aggregate: stateless, regenerated
//! per view, serializable so pages can embed it as inline JSON.

use serde::Serialize;

use crate::aggregate::Aggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    /// Per-record count behind the value (drives table views)
    pub count: u64,
    pub color: &'static str,
}

/// Secondary series drawn over the primary points (e.g. a moving average),
/// aligned index-for-index with `points`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOverlay {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    /// Records excluded from the statistic, surfaced for transparency
    pub excluded: u64,
    pub overlay: Option<ChartOverlay>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn with_overlay(mut self, label: &str, values: Vec<Option<f64>>) -> ChartSpec {
        self.overlay = Some(ChartOverlay {
            label: label.to_string(),
            values,
        });
        self
    }
}

/// Map an Aggregate to a ChartSpec.
///
/// Ordering: ascending by key when the grouping key is chronological,
/// otherwise descending by value. An empty Aggregate renders to a
/// zero-point spec — a valid, renderable state, not an error.
pub fn render_chart(agg: &Aggregate, kind: ChartKind, title: &str) -> ChartSpec {
    let mut groups = agg.groups.clone();
    if agg.key.is_chronological() {
        groups.sort_by(|a, b| a.key.cmp(&b.key));
    } else {
        let statistic = agg.statistic;
        // An "Other" roll-up bucket stays last regardless of its size
        groups.sort_by(|a, b| {
            let a_other = a.key.label().starts_with("Other");
            let b_other = b.key.label().starts_with("Other");
            a_other
                .cmp(&b_other)
                .then_with(|| b.value(statistic).total_cmp(&a.value(statistic)))
        });
    }

    let points = groups
        .iter()
        .map(|g| {
            let label = g.key.label();
            ChartPoint {
                color: color_for(&label),
                label,
                value: g.value(agg.statistic),
                count: g.count,
            }
        })
        .collect();

    ChartSpec {
        kind,
        title: title.to_string(),
        x_label: agg.key.label().to_string(),
        y_label: agg.statistic.label().to_string(),
        points,
        excluded: agg.excluded,
        overlay: None,
    }
}

// ── Colors ────────────────────────────────────────────────────────────────────

/// Fixed palette; a category keeps its color across every view because the
/// assignment depends only on the label text.
const PALETTE: [&str; 12] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948",
    "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac", "#86bcb6", "#d37295",
];

pub fn color_for(label: &str) -> &'static str {
    PALETTE[(fnv1a(label) % PALETTE.len() as u64) as usize]
}

fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in s.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Aggregate, GroupSummary, Statistic};
    use epifund_data::model::{GroupKey, GroupValue};

    fn year_group(year: i32, sum: f64) -> GroupSummary {
        GroupSummary {
            key: GroupValue::Year(year),
            sum,
            count: 1,
        }
    }

    fn label_group(label: &str, sum: f64) -> GroupSummary {
        GroupSummary {
            key: GroupValue::Label(label.to_string()),
            sum,
            count: 1,
        }
    }

    #[test]
    fn test_chronological_keys_order_ascending() {
        let agg = Aggregate {
            key: GroupKey::FiscalYear,
            statistic: Statistic::Sum,
            groups: vec![year_group(2021, 5.0), year_group(2019, 50.0), year_group(2020, 1.0)],
            excluded: 0,
        };
        let spec = render_chart(&agg, ChartKind::Bar, "Funding by Year");
        let labels: Vec<&str> = spec.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2019", "2020", "2021"]);
    }

    #[test]
    fn test_categorical_keys_order_descending_by_value() {
        let agg = Aggregate {
            key: GroupKey::Funder,
            statistic: Statistic::Sum,
            groups: vec![
                label_group("CURE", 10.0),
                label_group("NIH", 90.0),
                label_group("DoD", 40.0),
            ],
            excluded: 0,
        };
        let spec = render_chart(&agg, ChartKind::Bar, "Funding by Funder");
        let labels: Vec<&str> = spec.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["NIH", "DoD", "CURE"]);
    }

    #[test]
    fn test_other_bucket_stays_last() {
        let agg = Aggregate {
            key: GroupKey::Category,
            statistic: Statistic::Sum,
            groups: vec![
                label_group("R01", 100.0),
                label_group("Other Types", 80.0),
                label_group("R21", 20.0),
            ],
            excluded: 0,
        };
        let spec = render_chart(&agg, ChartKind::Pie, "By Activity");
        assert_eq!(spec.points.last().unwrap().label, "Other Types");
    }

    #[test]
    fn test_empty_aggregate_renders_zero_points() {
        let agg = Aggregate {
            key: GroupKey::FiscalYear,
            statistic: Statistic::Sum,
            groups: vec![],
            excluded: 0,
        };
        let spec = render_chart(&agg, ChartKind::Line, "Nothing");
        assert!(spec.is_empty());
        assert_eq!(spec.x_label, "Fiscal Year");
        assert_eq!(spec.y_label, "Total Funding (USD)");
    }

    #[test]
    fn test_colors_are_stable_across_views() {
        assert_eq!(color_for("NINDS"), color_for("NINDS"));
        let spec_color = {
            let agg = Aggregate {
                key: GroupKey::Funder,
                statistic: Statistic::Sum,
                groups: vec![label_group("NINDS", 1.0)],
                excluded: 0,
            };
            render_chart(&agg, ChartKind::Bar, "t").points[0].color
        };
        assert_eq!(spec_color, color_for("NINDS"));
    }

    #[test]
    fn test_spec_serializes_for_inline_embedding() {
        let agg = Aggregate {
            key: GroupKey::FiscalYear,
            statistic: Statistic::Sum,
            groups: vec![year_group(2020, 12.5)],
            excluded: 3,
        };
        let spec = render_chart(&agg, ChartKind::Bar, "Funding by Year")
            .with_overlay("3-year average", vec![None]);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["points"][0]["label"], "2020");
        assert_eq!(json["excluded"], 3);
        assert!(json["overlay"]["values"][0].is_null());
    }
}
