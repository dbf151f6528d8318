//! Dashboard handler — exploratory charts over one source dataset.
//!
//! Per request: resolve filters (clamping year bounds to the dataset's
//! actual range), run Aggregator → Chart Renderer, return a page with the
//! charts inline. The DataStore is only ever read.

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use epifund_analytics::{aggregate, render_chart, ChartKind, Filter, Statistic};
use epifund_common::DatasetSource;
use epifund_data::model::{Dataset, GroupKey};

use crate::handlers::{notice, page};
use crate::state::SharedState;
use crate::svg::{chart_html, escape};

/// Query-string filters. Numeric fields arrive as raw strings so malformed
/// input degrades to "no filter" instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewParams {
    pub dataset: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub state: Option<String>,
    pub funder: Option<String>,
}

impl ViewParams {
    pub fn source(&self) -> DatasetSource {
        self.dataset
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DatasetSource::DravetSyndrome)
    }

    /// Unclamped filter; range clamping needs the resolved dataset.
    pub fn filter(&self) -> Filter {
        Filter {
            year_from: parse_year(&self.year_from),
            year_to: parse_year(&self.year_to),
            funder: non_empty(&self.funder),
            state: non_empty(&self.state),
        }
    }
}

fn parse_year(raw: &Option<String>) -> Option<i32> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

fn non_empty(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

pub async fn dashboard(
    State(state): State<SharedState>,
    Query(params): Query<ViewParams>,
) -> Html<String> {
    let source = params.source();
    let dataset = match state.store.dataset(source) {
        Ok(ds) => ds,
        Err(reason) => {
            let body = format!(
                "{}{}{}",
                header(source),
                stat_cards(&state),
                notice(&format!("Data unavailable: {reason}")),
            );
            return Html(page(source.label(), &body));
        }
    };

    let filter = params.filter().clamped(&dataset);
    let mut sections: Vec<String> = Vec::new();

    // Funding trend by fiscal year, with the 3-year moving average overlay
    match aggregate(&dataset, GroupKey::FiscalYear, Statistic::Sum, &filter) {
        Ok(agg) => {
            let trend = agg.moving_average(3);
            let spec = render_chart(&agg, ChartKind::Bar, "Total Funding by Fiscal Year")
                .with_overlay("3-year moving average", trend);
            sections.push(chart_html(&spec));
        }
        Err(err) => sections.push(notice(&err.to_string())),
    }

    match aggregate(&dataset, GroupKey::FiscalYear, Statistic::Mean, &filter) {
        Ok(agg) => {
            let spec = render_chart(&agg, ChartKind::Line, "Average Award Size by Fiscal Year");
            sections.push(chart_html(&spec));
        }
        Err(err) => sections.push(notice(&err.to_string())),
    }

    if dataset.supports(GroupKey::Funder) {
        match aggregate(&dataset, GroupKey::Funder, Statistic::Sum, &filter) {
            Ok(agg) => {
                let spec = render_chart(&agg.top_n(10), ChartKind::Bar, "Top 10 Funders");
                sections.push(chart_html(&spec));
            }
            Err(err) => sections.push(notice(&err.to_string())),
        }
    }

    if dataset.supports(GroupKey::State) {
        match aggregate(&dataset, GroupKey::State, Statistic::Sum, &filter) {
            Ok(agg) => {
                let spec = render_chart(&agg, ChartKind::Bar, "Total Funding by State");
                sections.push(chart_html(&spec));
            }
            Err(err) => sections.push(notice(&err.to_string())),
        }
    }

    if dataset.supports(GroupKey::Category) {
        match aggregate(&dataset, GroupKey::Category, Statistic::Sum, &filter) {
            Ok(agg) => {
                let spec = render_chart(
                    &agg.top_n_with_other(5, "Other Types"),
                    ChartKind::Pie,
                    "Funding Distribution by Activity",
                );
                sections.push(chart_html(&spec));
            }
            Err(err) => sections.push(notice(&err.to_string())),
        }
    }

    let body = format!(
        r#"{}
{}
{}
<div class="chart-grid">
{}
</div>"#,
        header(source),
        stat_cards(&state),
        filter_form("/", source, &params, &filter, &dataset),
        sections.join("\n")
    );

    Html(page(source.label(), &body))
}

pub(crate) fn header(source: DatasetSource) -> String {
    format!(
        r#"<div class="page-header">
    <h1 class="page-title">{}</h1>
    <p class="text-muted">Epilepsy-research funding analysis — aggregates recomputed per request over the startup-time dataset cache</p>
</div>"#,
        escape(source.label())
    )
}

/// Stat cards: per-source record counts, unavailable sources flagged.
pub(crate) fn stat_cards(state: &SharedState) -> String {
    let cards: String = state
        .store
        .summaries()
        .iter()
        .map(|s| match (&s.rows, &s.error) {
            (Some(rows), _) => format!(
                r#"<div class="stat-card">
    <div class="stat-value">{rows}</div>
    <div class="stat-label"><a href="/?dataset={}">{}</a></div>
</div>"#,
                s.source.as_str(),
                escape(s.source.label()),
            ),
            (None, reason) => format!(
                r#"<div class="stat-card stat-card-error" title="{}">
    <div class="stat-value">—</div>
    <div class="stat-label">{} (unavailable)</div>
</div>"#,
                escape(reason.as_deref().unwrap_or("load failed")),
                escape(s.source.label()),
            ),
        })
        .collect();
    format!(r#"<div class="stats-grid">{cards}</div>"#)
}

pub(crate) fn filter_form(
    action: &str,
    source: DatasetSource,
    params: &ViewParams,
    filter: &Filter,
    dataset: &Dataset,
) -> String {
    let options: String = DatasetSource::ALL
        .iter()
        .map(|&s| {
            let selected = if s == source { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                s.as_str(),
                escape(s.label())
            )
        })
        .collect();

    let bounds_hint = match dataset.year_bounds() {
        Some((min, max)) => format!("data covers {min}–{max}"),
        None => "no dated records".to_string(),
    };

    format!(
        r#"<form method="get" action="{action}" class="filter-bar">
    <label>Dataset
        <select name="dataset">{options}</select>
    </label>
    <label>Year from
        <input name="year_from" size="6" value="{}">
    </label>
    <label>Year to
        <input name="year_to" size="6" value="{}">
    </label>
    <label>State
        <input name="state" size="4" value="{}">
    </label>
    <label>Funder
        <input name="funder" size="12" value="{}">
    </label>
    <button type="submit" class="btn">Apply</button>
    <span class="text-muted">{bounds_hint}</span>
</form>"#,
        filter.year_from.map(|y| y.to_string()).unwrap_or_default(),
        filter.year_to.map(|y| y.to_string()).unwrap_or_default(),
        escape(params.state.as_deref().unwrap_or("")),
        escape(params.funder.as_deref().unwrap_or("")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dataset_is_the_nih_export() {
        let params = ViewParams::default();
        assert_eq!(params.source(), DatasetSource::DravetSyndrome);
    }

    #[test]
    fn test_unknown_dataset_slug_falls_back_to_default() {
        let params = ViewParams {
            dataset: Some("no_such_file".into()),
            ..ViewParams::default()
        };
        assert_eq!(params.source(), DatasetSource::DravetSyndrome);
    }

    #[test]
    fn test_malformed_years_degrade_to_no_filter() {
        let params = ViewParams {
            year_from: Some("twenty-nineteen".into()),
            year_to: Some(" 2023 ".into()),
            ..ViewParams::default()
        };
        let filter = params.filter();
        assert_eq!(filter.year_from, None);
        assert_eq!(filter.year_to, Some(2023));
    }

    #[test]
    fn test_blank_selectors_are_dropped() {
        let params = ViewParams {
            state: Some("  ".into()),
            funder: Some("NIH".into()),
            ..ViewParams::default()
        };
        let filter = params.filter();
        assert_eq!(filter.state, None);
        assert_eq!(filter.funder, Some("NIH".into()));
    }
}
