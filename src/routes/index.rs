//! Landing page

use axum::{extract::State, response::Html};

use crate::state::AppState;

pub async fn landing_page(State(state): State<AppState>) -> Html<String> {
    let web = &state.config().web;

    Html(format!(
        r#"<html>
<head><title>OSS Exporter</title></head>
<body>
<h1>OSS Exporter</h1>
<p><a href="{probe}?bucket=BUCKET&prefix=PREFIX">Query metrics for objects in BUCKET that match PREFIX</a></p>
<p><a href="{metrics}">Metrics</a></p>
</body>
</html>"#,
        probe = web.probe_path,
        metrics = web.metrics_path,
    ))
}
