//! epifund-analytics — Aggregator and Chart Renderer.
//!
//! Pure functions over loaded Datasets: grouped summary statistics with
//! explicit null accounting, and renderer-agnostic chart specifications.
//! Nothing here mutates shared state; every Aggregate and ChartSpec is
//! rebuilt wholesale from the Dataset and the active filter.

pub mod aggregate;
pub mod chart;

pub use aggregate::{aggregate, Aggregate, Filter, GroupSummary, Statistic};
pub use chart::{render_chart, ChartKind, ChartOverlay, ChartPoint, ChartSpec};
