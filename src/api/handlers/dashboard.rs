//! HTML dashboard rendered from the status overview.

use axum::{extract::State, response::Html};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::STATUS_TAG;
use crate::state::AppState;
use crate::status::StatusOverview;

pub fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(dashboard))
}

/// GET / - Human readable status page.
#[utoipa::path(
    get,
    path = "/",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Status dashboard", content_type = "text/html", body = String)
    )
)]
async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let application = &state.settings.application;
    let overview = state
        .status
        .overview(&application.name, &application.version, &state.manager)
        .await;
    Html(render(&overview))
}

/// Render the overview as a standalone page.
pub fn render(overview: &StatusOverview) -> String {
    let (badge, badge_class) = if overview.health.healthy {
        ("healthy", "ok")
    } else {
        ("unhealthy", "bad")
    };

    let mut page = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{name} status</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{name} <small>{version}</small></h1>\n\
         <p class=\"badge {badge_class}\">{badge}</p>\n\
         <p class=\"muted\">Generated at {timestamp}</p>\n",
        name = escape(&overview.application),
        version = escape(&overview.version),
        timestamp = overview.timestamp,
    );

    page.push_str("<h2>Configuration</h2>\n<table>\n<tr><th>Setting</th><th>Value</th></tr>\n");
    for (name, value) in overview.config.iter() {
        page.push_str(&row(&[name, &value.to_string()]));
    }
    page.push_str("</table>\n");

    let validation = &overview.health.validation;
    if !validation.is_valid {
        page.push_str("<h2>Validation errors</h2>\n<ul>\n");
        for error in &validation.errors {
            page.push_str(&format!(
                "<li><strong>{}</strong> = {}: {}</li>\n",
                escape(&error.variable),
                escape(&error.value.to_string()),
                escape(&error.error)
            ));
        }
        page.push_str("</ul>\n");
    }

    let drift = &overview.health.drift;
    if drift.drift_detected {
        page.push_str(
            "<h2>Drift</h2>\n<table>\n<tr><th>Setting</th><th>At startup</th><th>Now</th></tr>\n",
        );
        for change in &drift.changes {
            page.push_str(&row(&[
                &change.variable,
                &change.initial_value.to_string(),
                &change.current_value.to_string(),
            ]));
        }
        page.push_str("</table>\n");
    }

    if let Some(commit) = &overview.commit {
        page.push_str(&format!(
            "<h2>Last commit</h2>\n<p><code>{}</code> {}<br>{} &lt;{}&gt; at {}</p>\n",
            escape(commit.short_hash()),
            escape(&commit.message),
            escape(&commit.author),
            escape(&commit.email),
            escape(&commit.date)
        ));
    }

    if let Some(deployment) = &overview.deployment {
        page.push_str("<h2>Deployment</h2>\n<table>\n");
        for (key, value) in deployment {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            page.push_str(&row(&[key, &value]));
        }
        page.push_str("</table>\n");
    }

    if let Some(dependencies) = &overview.dependencies {
        for (title, list) in [
            ("Dependencies", &dependencies.dependencies),
            ("Dev dependencies", &dependencies.dev_dependencies),
        ] {
            if list.is_empty() {
                continue;
            }
            page.push_str(&format!("<h2>{}</h2>\n<ul>\n", title));
            for (name, version) in list {
                page.push_str(&format!(
                    "<li>{} <code>{}</code></li>\n",
                    escape(name),
                    escape(version)
                ));
            }
            page.push_str("</ul>\n");
        }
    }

    if !overview.errors.is_empty() {
        page.push_str("<h2>Unavailable</h2>\n<ul class=\"muted\">\n");
        for (section, message) in &overview.errors {
            page.push_str(&format!("<li>{}: {}</li>\n", escape(section), escape(message)));
        }
        page.push_str("</ul>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// One table row, cells escaped.
fn row(cells: &[&str]) -> String {
    let mut row = String::from("<tr>");
    for cell in cells {
        row.push_str("<td>");
        row.push_str(&escape(cell));
        row.push_str("</td>");
    }
    row.push_str("</tr>\n");
    row
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;max-width:60rem}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.25rem .75rem;text-align:left}\
.badge{display:inline-block;padding:.25rem .75rem;border-radius:.25rem;color:#fff}\
.ok{background:#2e7d32}.bad{background:#c62828}.muted{color:#666}";

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_health::{
        ConfigSnapshot, DriftChange, DriftResult, HealthResult, ValidationResult,
    };
    use std::collections::BTreeMap;

    fn overview(health: HealthResult) -> StatusOverview {
        let mut config = ConfigSnapshot::new();
        config.insert("PORT", "8080");
        config.insert("HOST", "<script>");
        StatusOverview {
            application: "statusboard".to_string(),
            version: "0.1.0".to_string(),
            timestamp: jiff::Timestamp::UNIX_EPOCH,
            config,
            health,
            dependencies: None,
            commit: None,
            deployment: None,
            errors: BTreeMap::from([("commit".to_string(), "not a git repository".to_string())]),
        }
    }

    fn healthy() -> HealthResult {
        HealthResult {
            validation: ValidationResult::from_errors(vec![]),
            drift: DriftResult::from_changes(vec![]),
            healthy: true,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    }

    #[test]
    fn test_render_healthy_page() {
        let page = render(&overview(healthy()));

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("badge ok"));
        assert!(page.contains("<td>PORT</td><td>8080</td>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("commit: not a git repository"));
        assert!(!page.contains("<h2>Drift</h2>"));
    }

    #[test]
    fn test_render_shows_drift() {
        let health = HealthResult {
            validation: ValidationResult::from_errors(vec![]),
            drift: DriftResult::from_changes(vec![DriftChange {
                variable: "PORT".to_string(),
                initial_value: "8080".into(),
                current_value: "9090".into(),
            }]),
            healthy: false,
        };
        let page = render(&overview(health));

        assert!(page.contains("badge bad"));
        assert!(page.contains("<tr><td>PORT</td><td>8080</td><td>9090</td></tr>"));
    }
}
