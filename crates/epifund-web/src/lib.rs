//! epifund-web — Web Presenter for the funding dashboard.
//! Provides:
//!   - Exploratory dashboard (funding by year, funder, state, activity)
//!   - Investigator table (top PIs by funding and project count)
//!   - Per-request filtering with clamped year ranges
//!
//! Every request reads the startup-time DataStore read-only and re-runs
//! Aggregator → Chart Renderer; nothing mutates shared state.

pub mod handlers;
pub mod router;
pub mod state;
pub mod svg;
