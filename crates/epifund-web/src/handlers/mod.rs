//! HTTP handlers for all web routes.

pub mod dashboard;
pub mod investigators;

use crate::svg::escape;

/// Navigation HTML fragment shared across all pages
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

/// Outer page shell: head, stylesheet, nav, main content.
pub(crate) fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} — Epifund</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<div class="app-container">
{}
<main class="main-content">
{}
</main>
</div>
</body>
</html>"#,
        escape(title),
        NAV_HTML,
        body
    )
}

/// User-visible error block; requests never crash the process.
pub(crate) fn notice(message: &str) -> String {
    format!(r#"<div class="notice notice-error">{}</div>"#, escape(message))
}
