//! Investigator table — top PIs by total funding and project count.

use axum::extract::{Query, State};
use axum::response::Html;

use epifund_analytics::{aggregate, render_chart, ChartKind, Statistic};
use epifund_data::model::GroupKey;

use crate::handlers::dashboard::{filter_form, header, stat_cards, ViewParams};
use crate::handlers::{notice, page};
use crate::state::SharedState;
use crate::svg::chart_html;

pub async fn investigators_page(
    State(state): State<SharedState>,
    Query(params): Query<ViewParams>,
) -> Html<String> {
    let source = params.source();
    let dataset = match state.store.dataset(source) {
        Ok(ds) => ds,
        Err(reason) => {
            let body = format!(
                "{}{}",
                header(source),
                notice(&format!("Data unavailable: {reason}"))
            );
            return Html(page("Investigators", &body));
        }
    };

    let filter = params.filter().clamped(&dataset);

    let table = if dataset.supports(GroupKey::Investigator) {
        match aggregate(&dataset, GroupKey::Investigator, Statistic::Sum, &filter) {
            Ok(agg) => {
                let spec = render_chart(
                    &agg.top_n(10),
                    ChartKind::Table,
                    "Top 10 Investigators by Total Funding",
                );
                chart_html(&spec)
            }
            Err(err) => notice(&err.to_string()),
        }
    } else {
        notice(&format!(
            "The {} dataset has no investigator column",
            source.label()
        ))
    };

    let body = format!(
        "{}\n{}\n{}\n{}",
        header(source),
        stat_cards(&state),
        filter_form("/investigators", source, &params, &filter, &dataset),
        table
    );

    Html(page("Investigators", &body))
}
