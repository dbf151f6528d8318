//! Server-side chart rendering: ChartSpec → SVG/HTML fragments.
//!
//! Pages stay self-contained: each chart is drawn as inline SVG and its
//! ChartSpec is embedded alongside as inline JSON for client-side use.

use epifund_analytics::{ChartKind, ChartSpec};

const W: f64 = 640.0;
const H: f64 = 320.0;
const LEFT: f64 = 24.0;
const RIGHT: f64 = 616.0;
const TOP: f64 = 34.0;
const BASELINE: f64 = 258.0;

/// Full chart fragment: heading, drawn chart, exclusion note, inline data.
pub fn chart_html(spec: &ChartSpec) -> String {
    let body = if spec.is_empty() {
        r#"<div class="chart-empty">No data for the current filter.</div>"#.to_string()
    } else {
        match spec.kind {
            ChartKind::Bar => svg_bar(spec),
            ChartKind::Line => svg_line(spec),
            ChartKind::Pie => svg_pie(spec),
            ChartKind::Table => html_table(spec),
        }
    };

    let excluded_note = if spec.excluded > 0 {
        format!(
            r#"<figcaption class="text-muted">{} records excluded (missing values)</figcaption>"#,
            spec.excluded
        )
    } else {
        String::new()
    };

    // `</` must not terminate the surrounding script element
    let json = serde_json::to_string(spec)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<figure class="chart-card">
    <h3>{}</h3>
    {}
    {}
    <script type="application/json" class="chart-data">{}</script>
</figure>"#,
        escape(&spec.title),
        body,
        excluded_note,
        json
    )
}

fn is_monetary(spec: &ChartSpec) -> bool {
    spec.y_label.contains("USD")
}

fn max_value(spec: &ChartSpec) -> f64 {
    let bars = spec
        .points
        .iter()
        .map(|p| p.value)
        .fold(0.0_f64, f64::max);
    let overlay = spec
        .overlay
        .iter()
        .flat_map(|o| o.values.iter().flatten())
        .fold(0.0_f64, |acc, v| acc.max(*v));
    let max = bars.max(overlay);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn svg_bar(spec: &ChartSpec) -> String {
    let n = spec.points.len();
    let max = max_value(spec);
    let slot = (RIGHT - LEFT) / n as f64;
    let monetary = is_monetary(spec);

    let mut parts = Vec::new();
    for (i, p) in spec.points.iter().enumerate() {
        let x = LEFT + i as f64 * slot + slot * 0.15;
        let width = slot * 0.7;
        let height = p.value / max * (BASELINE - TOP);
        let y = BASELINE - height;
        let cx = x + width / 2.0;
        parts.push(format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{height:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            p.color,
            escape(&p.label),
            fmt_value(p.value, monetary),
        ));
        parts.push(format!(
            r#"<text x="{cx:.1}" y="{:.1}" class="value-label" text-anchor="middle">{}</text>"#,
            y - 6.0,
            fmt_value(p.value, monetary),
        ));
        parts.push(format!(
            r#"<text x="{cx:.1}" y="{:.1}" class="axis-label" text-anchor="middle">{}</text>"#,
            BASELINE + 16.0,
            escape(&truncate(&p.label, 12)),
        ));
    }

    if let Some(overlay) = &spec.overlay {
        let points: Vec<String> = overlay
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                v.map(|v| {
                    let cx = LEFT + i as f64 * slot + slot / 2.0;
                    let cy = BASELINE - v / max * (BASELINE - TOP);
                    format!("{cx:.1},{cy:.1}")
                })
            })
            .collect();
        if !points.is_empty() {
            parts.push(format!(
                r##"<polyline points="{}" fill="none" stroke="#f28e2b" stroke-width="2"/>"##,
                points.join(" ")
            ));
            parts.push(format!(
                r##"<text x="{RIGHT:.1}" y="{:.1}" class="axis-label" text-anchor="end" fill="#f28e2b">{}</text>"##,
                TOP - 14.0,
                escape(&overlay.label)
            ));
        }
    }

    frame(spec, parts)
}

fn svg_line(spec: &ChartSpec) -> String {
    let n = spec.points.len();
    let max = max_value(spec);
    let slot = (RIGHT - LEFT) / n as f64;
    let monetary = is_monetary(spec);

    let mut coords = Vec::new();
    let mut parts = Vec::new();
    for (i, p) in spec.points.iter().enumerate() {
        let cx = LEFT + i as f64 * slot + slot / 2.0;
        let cy = BASELINE - p.value / max * (BASELINE - TOP);
        coords.push(format!("{cx:.1},{cy:.1}"));
        parts.push(format!(
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="3" fill="{}"><title>{}: {}</title></circle>"#,
            p.color,
            escape(&p.label),
            fmt_value(p.value, monetary),
        ));
        parts.push(format!(
            r#"<text x="{cx:.1}" y="{:.1}" class="axis-label" text-anchor="middle">{}</text>"#,
            BASELINE + 16.0,
            escape(&truncate(&p.label, 12)),
        ));
    }
    parts.insert(
        0,
        format!(
            r##"<polyline points="{}" fill="none" stroke="#4e79a7" stroke-width="2"/>"##,
            coords.join(" ")
        ),
    );

    frame(spec, parts)
}

fn svg_pie(spec: &ChartSpec) -> String {
    const CX: f64 = 160.0;
    const CY: f64 = 160.0;
    const R: f64 = 120.0;

    let total: f64 = spec.points.iter().map(|p| p.value.max(0.0)).sum();
    let monetary = is_monetary(spec);
    if total <= 0.0 {
        return r#"<div class="chart-empty">No data for the current filter.</div>"#.to_string();
    }

    let mut parts = Vec::new();
    let mut angle = -std::f64::consts::FRAC_PI_2;
    for p in &spec.points {
        let frac = p.value.max(0.0) / total;
        if frac <= 0.0 {
            continue;
        }
        if frac >= 0.999 {
            parts.push(format!(
                r#"<circle cx="{CX}" cy="{CY}" r="{R}" fill="{}"><title>{}: 100%</title></circle>"#,
                p.color,
                escape(&p.label)
            ));
            break;
        }
        let end = angle + frac * std::f64::consts::TAU;
        let (x1, y1) = (CX + R * angle.cos(), CY + R * angle.sin());
        let (x2, y2) = (CX + R * end.cos(), CY + R * end.sin());
        let large_arc = i32::from(frac > 0.5);
        parts.push(format!(
            r##"<path d="M{CX},{CY} L{x1:.2},{y1:.2} A{R},{R} 0 {large_arc},1 {x2:.2},{y2:.2} Z" fill="{}" stroke="#fff" stroke-width="1"><title>{}: {} ({:.1}%)</title></path>"##,
            p.color,
            escape(&p.label),
            fmt_value(p.value, monetary),
            frac * 100.0,
        ));
        angle = end;
    }

    // Legend to the right of the pie
    for (i, p) in spec.points.iter().enumerate() {
        let y = 48.0 + i as f64 * 22.0;
        let pct = p.value.max(0.0) / total * 100.0;
        parts.push(format!(
            r#"<rect x="310" y="{:.1}" width="12" height="12" fill="{}"/>"#,
            y - 10.0,
            p.color
        ));
        parts.push(format!(
            r#"<text x="328" y="{y:.1}" class="axis-label">{} ({pct:.1}%)</text>"#,
            escape(&truncate(&p.label, 24)),
        ));
    }

    format!(
        r#"<svg viewBox="0 0 560 320" role="img" aria-label="{}">{}</svg>"#,
        escape(&spec.title),
        parts.join("\n    ")
    )
}

fn html_table(spec: &ChartSpec) -> String {
    let monetary = is_monetary(spec);
    let rows: String = spec
        .points
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&p.label),
                fmt_value(p.value, monetary),
                p.count
            )
        })
        .collect();
    format!(
        r#"<table class="table"><thead><tr><th>{}</th><th>{}</th><th>Records</th></tr></thead><tbody>{}</tbody></table>"#,
        escape(&spec.x_label),
        escape(&spec.y_label),
        rows
    )
}

fn frame(spec: &ChartSpec, parts: Vec<String>) -> String {
    format!(
        r##"<svg viewBox="0 0 {W} {H}" role="img" aria-label="{}">
    <line x1="{LEFT}" y1="{BASELINE}" x2="{RIGHT}" y2="{BASELINE}" stroke="#999"/>
    <text x="{LEFT}" y="{:.1}" class="axis-label">{}</text>
    {}
</svg>"##,
        escape(&spec.title),
        TOP - 14.0,
        escape(&spec.y_label),
        parts.join("\n    ")
    )
}

// ── Text helpers ──────────────────────────────────────────────────────────────

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

pub fn fmt_value(v: f64, monetary: bool) -> String {
    if monetary {
        if v.abs() >= 1e9 {
            format!("${:.2}B", v / 1e9)
        } else if v.abs() >= 1e6 {
            format!("${:.2}M", v / 1e6)
        } else if v.abs() >= 1e3 {
            format!("${:.1}K", v / 1e3)
        } else {
            format!("${v:.0}")
        }
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use epifund_analytics::{ChartKind, ChartPoint, ChartSpec};

    fn spec(kind: ChartKind, values: &[(&str, f64)]) -> ChartSpec {
        ChartSpec {
            kind,
            title: "Test Chart".into(),
            x_label: "Funder".into(),
            y_label: "Total Funding (USD)".into(),
            points: values
                .iter()
                .map(|(label, value)| ChartPoint {
                    label: label.to_string(),
                    value: *value,
                    count: 1,
                    color: "#4e79a7",
                })
                .collect(),
            excluded: 0,
            overlay: None,
        }
    }

    #[test]
    fn test_bar_chart_draws_one_rect_per_point() {
        let html = chart_html(&spec(ChartKind::Bar, &[("NIH", 5.0), ("CURE", 3.0)]));
        assert_eq!(html.matches("<rect").count(), 2);
        assert!(html.contains(r#"<script type="application/json""#));
    }

    #[test]
    fn test_empty_spec_renders_placeholder_not_error() {
        let html = chart_html(&spec(ChartKind::Bar, &[]));
        assert!(html.contains("No data for the current filter."));
    }

    #[test]
    fn test_single_slice_pie_renders_full_circle() {
        let html = chart_html(&spec(ChartKind::Pie, &[("R01", 10.0)]));
        assert!(html.contains("<circle"));
    }

    #[test]
    fn test_labels_are_html_escaped() {
        let html = chart_html(&spec(ChartKind::Table, &[("Smith & Wesson <Lab>", 1.0)]));
        assert!(html.contains("Smith &amp; Wesson &lt;Lab&gt;"));
        assert!(!html.contains("<Lab>"));
    }

    #[test]
    fn test_money_formatting_scales_units() {
        assert_eq!(fmt_value(1_250_000.0, true), "$1.25M");
        assert_eq!(fmt_value(3_500.0, true), "$3.5K");
        assert_eq!(fmt_value(12.0, false), "12");
    }

    #[test]
    fn test_inline_json_cannot_close_the_script_tag() {
        let html = chart_html(&spec(ChartKind::Bar, &[("</script>", 1.0)]));
        // The label inside the JSON blob must arrive with its `</` escaped
        assert!(html.contains(r#"<\/script>"#));
    }
}
