//! Web rendering of the timeline.
//!
//! A minimal axum server: every `GET /` re-runs the full ingestion pipeline
//! and renders one HTML page. No caching, no state between requests. A
//! request always reaches one of three terminal pages: the timeline, an
//! empty-data page, or an error banner.

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::config::IngestConfig;
use crate::error::Result;
use crate::ingest::load_timeline;
use crate::model::{TimelineFilter, TimelineItem, categories, statuses};

#[derive(Clone)]
struct AppState {
    config: IngestConfig,
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: IngestConfig, port: u16) -> Result<()> {
    let app = Router::new()
        .route("/", get(timeline_page))
        .route("/healthz", get(healthz))
        .with_state(AppState { config });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "web server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

/// Filter values from the query string; absent means "all".
#[derive(Debug, Default, Deserialize)]
struct TimelineQuery {
    category: Option<String>,
    status: Option<String>,
}

async fn timeline_page(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Html<String> {
    match load_timeline(&state.config).await {
        Ok(data) => {
            let mut items = data.items;
            let all_categories = categories(&items);
            let all_statuses = statuses(&items);
            TimelineFilter {
                category: query.category.clone(),
                status: query.status.clone(),
            }
            .apply(&mut items);
            Html(render_timeline(
                &items,
                &all_categories,
                &all_statuses,
                &query,
            ))
        }
        Err(e) => {
            error!("timeline load failed: {}", e);
            Html(render_error(&e.to_string()))
        }
    }
}

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
li{margin:.5rem 0}.meta{color:#666;font-size:.85em}.banner{background:#fdd;border:1px solid #c00;\
padding:.5rem 1rem}.empty{color:#666}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head><body><h1>{}</h1>{}</body></html>",
        escape_html(title),
        PAGE_STYLE,
        escape_html(title),
        body
    )
}

fn render_error(message: &str) -> String {
    page(
        "lifemap",
        &format!("<p class=\"banner\">{}</p>", escape_html(message)),
    )
}

fn render_timeline(
    items: &[TimelineItem],
    all_categories: &[String],
    all_statuses: &[String],
    query: &TimelineQuery,
) -> String {
    let mut body = String::new();
    body.push_str(&render_filter_form(all_categories, all_statuses, query));

    if items.is_empty() {
        body.push_str("<p class=\"empty\">No timeline items.</p>");
    } else {
        body.push_str("<ol>");
        for item in items {
            body.push_str(&render_item(item));
        }
        body.push_str("</ol>");
    }

    page("lifemap", &body)
}

fn render_filter_form(
    all_categories: &[String],
    all_statuses: &[String],
    query: &TimelineQuery,
) -> String {
    format!(
        "<form method=\"get\"><label>Category {}</label> <label>Status {}</label> \
         <button type=\"submit\">Filter</button></form>",
        render_select("category", all_categories, query.category.as_deref()),
        render_select("status", all_statuses, query.status.as_deref()),
    )
}

fn render_select(name: &str, values: &[String], selected: Option<&str>) -> String {
    let mut options = String::from("<option value=\"\">all</option>");
    for value in values {
        let flag = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{v}\"{flag}>{v}</option>",
            v = escape_html(value),
            flag = flag
        ));
    }
    format!("<select name=\"{}\">{}</select>", name, options)
}

fn render_item(item: &TimelineItem) -> String {
    let mut meta = Vec::new();
    meta.push(item.kind.to_string());
    if !item.status.is_empty() {
        meta.push(item.status.clone());
    }
    if !item.priority.is_empty() {
        meta.push(item.priority.clone());
    }
    if let Some(start) = item.start_date {
        match item.end_date {
            Some(end) => meta.push(format!("{} → {}", start, end)),
            None => meta.push(format!("{} →", start)),
        }
    }
    if let Some(ref author) = item.author {
        meta.push(format!("by {}", author));
    }
    if let Some(ref timeframe) = item.timeframe {
        meta.push(timeframe.clone());
    }
    if !item.tags.is_empty() {
        meta.push(item.tags.join(", "));
    }

    let title = match item.url {
        Some(ref url) => format!(
            "<a href=\"{}\">{}</a>",
            escape_html(url),
            escape_html(&item.title)
        ),
        None => escape_html(&item.title),
    };

    format!(
        "<li><strong>{}</strong> <span class=\"meta\">{}</span></li>",
        title,
        escape_html(&meta.join(" · "))
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
