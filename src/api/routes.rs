use axum::{
    routing::get,
    Router,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use tower_http::cors::{CorsLayer, Any};
use tracing::debug;

use crate::error::{Result, AppError};
use crate::api::models::{ChartQuery, StatusResponse};
use crate::api::response;
use crate::render::render_svg;
use crate::AppState;

/// Largest canvas edge the chart route will render.
pub const MAX_DIMENSION: u32 = 8192;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(viewer_page))
        .route("/health", get(health))
        .route("/api/status", get(status_handler))
        .route("/api/chart.svg", get(chart_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.board.snapshot();
    let status = StatusResponse::from_snapshot(&snapshot, &state.config.api_url);
    if snapshot.is_ready() {
        response::success(status)
    } else {
        let message = format!("Loading... {}/{} cities", snapshot.loaded, snapshot.expected);
        response::success_with_message(status, Some(message))
    }
}

/// One display refresh of the chart.
async fn chart_handler(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse> {
    let width = checked_dimension("width", query.width.unwrap_or(state.config.canvas_width))?;
    let height = checked_dimension("height", query.height.unwrap_or(state.config.canvas_height))?;

    let snapshot = state.board.snapshot();
    let start_time = std::time::Instant::now();
    let svg = render_svg(&snapshot, &state.dates, width, height)?;
    debug!(
        "Rendered {}x{} frame (ready: {}) in {:?}",
        width,
        height,
        snapshot.is_ready(),
        start_time.elapsed()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    ))
}

fn checked_dimension(name: &str, value: u32) -> Result<u32> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(AppError::BadRequest(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_DIMENSION, value
        )));
    }
    Ok(value)
}

async fn viewer_page() -> Html<&'static str> {
    Html(VIEWER_HTML)
}

/// Sizes the chart to 80% of the viewport and re-requests it every second.
const VIEWER_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Sunsets in London and Lisbon</title>
<style>
  html, body { margin: 0; height: 100%; background: #fff; }
  #canvas-container { position: absolute; }
  #canvas-container img { display: block; width: 100%; height: 100%; }
</style>
</head>
<body>
<div id="canvas-container"><img id="chart" alt="Sunsets in London and Lisbon"></div>
<script>
  const SIZE = 0.80;
  const container = document.getElementById("canvas-container");
  const chart = document.getElementById("chart");
  let width = 0, height = 0;

  function updateCanvas() {
    width = Math.floor(window.innerWidth * SIZE);
    height = Math.floor(window.innerHeight * SIZE);
    container.style.width = width + "px";
    container.style.height = height + "px";
    container.style.left = ((window.innerWidth - width) / 2) + "px";
    container.style.top = ((window.innerHeight - height) / 5 * 2) + "px";
    redraw();
  }

  function redraw() {
    chart.src = `/api/chart.svg?width=${width}&height=${height}&t=${Date.now()}`;
  }

  window.addEventListener("resize", updateCanvas);
  updateCanvas();
  setInterval(redraw, 1000);
</script>
</body>
</html>
"#;
