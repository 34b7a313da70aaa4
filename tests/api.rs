use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use sunset_chart::{
    api::routes::create_router,
    board::LoadBoard,
    config::Config,
    error::AppError,
    fetcher::spawn_fetches,
    model::{Target, CITIES, LONDON},
    sunset_api::{SunsetApiClient, SunsetSource},
    AppState,
};
use tokio::net::TcpListener;

/// Stand-in for api.sunrise-sunset.org. Sunsets are keyed by date. London's
/// 2022-08-06 answers 500 and every 2022-10-06 request answers non-JSON.
async fn fake_upstream(
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let date = params.get("date").cloned().unwrap_or_default();
    let lat = params.get("lat").cloned().unwrap_or_default();
    match date.as_str() {
        "2022-08-06" if lat == LONDON.lat => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response()
        }
        "2022-10-06" => "not json".into_response(),
        "2022-08-06" => sunset("7:30:00 PM"),
        "2022-09-06" => sunset("7:15:00 PM"),
        "1999-01-01" => Json(json!({"results": "", "status": "INVALID_DATE"})).into_response(),
        _ => sunset("4:45:00 PM"),
    }
}

fn sunset(time: &str) -> Response {
    Json(json!({
        "results": {"sunrise": "6:00:00 AM", "sunset": time, "day_length": "12:00:00"},
        "status": "OK"
    }))
    .into_response()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn upstream_url() -> String {
    let addr = serve(Router::new().route("/json", get(fake_upstream))).await;
    format!("http://{}/json", addr)
}

fn config(api_url: &str) -> Config {
    Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        api_url: api_url.to_string(),
        request_timeout: Some(Duration::from_secs(5)),
        canvas_width: 900,
        canvas_height: 500,
    }
}

#[tokio::test]
async fn client_reads_sunset_from_upstream() {
    let client = SunsetApiClient::new(upstream_url().await, None);

    let ok = client.fetch_sunset(&Target::new(&CITIES[1], "2022-08-06")).await.unwrap();
    assert_eq!(ok.raw(), "7:30:00 PM");
    assert_eq!(ok.seconds_since_midnight(), 27000);

    let down = client.fetch_sunset(&Target::new(&LONDON, "2022-08-06")).await;
    assert!(matches!(down, Err(AppError::FetchError(_))));

    let garbled = client.fetch_sunset(&Target::new(&LONDON, "2022-10-06")).await;
    assert!(matches!(garbled, Err(AppError::ParseError(_))));

    let rejected = client.fetch_sunset(&Target::new(&LONDON, "1999-01-01")).await;
    assert!(rejected.is_err());
}

#[tokio::test]
async fn client_reports_unreachable_hosts() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SunsetApiClient::new(format!("http://{}/json", addr), Some(Duration::from_secs(2)));
    let result = client.fetch_sunset(&Target::new(&LONDON, "2022-08-06")).await;
    assert!(matches!(result, Err(AppError::FetchError(_))));
}

#[tokio::test]
async fn serves_loading_then_chart() {
    let api_url = upstream_url().await;
    let dates: Vec<String> = ["2022-08-06", "2022-09-06", "2022-10-06", "2022-11-06"]
        .iter()
        .map(|d| d.to_string())
        .collect();
    let board = Arc::new(LoadBoard::new(&CITIES));
    let state = AppState {
        config: Arc::new(config(&api_url)),
        board: Arc::clone(&board),
        dates: Arc::new(dates.clone()),
    };
    let addr = serve(create_router(state)).await;
    let http = reqwest::Client::new();

    let loading = http
        .get(format!("http://{}/api/chart.svg?width=800&height=600", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(loading.status(), 200);
    assert_eq!(loading.headers()["content-type"], "image/svg+xml");
    let body = loading.text().await.unwrap();
    assert!(body.contains("Loading..."));

    let pending: Value = http
        .get(format!("http://{}/api/status", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending["data"]["ready"], false);
    assert_eq!(pending["meta"]["message"], "Loading... 0/2 cities");

    let source = Arc::new(SunsetApiClient::new(api_url.clone(), Some(Duration::from_secs(5))));
    for handle in spawn_fetches(Arc::clone(&board), source, &CITIES, &dates) {
        handle.await.unwrap();
    }

    let status: Value = http
        .get(format!("http://{}/api/status", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let data = &status["data"];
    assert_eq!(data["loaded"], 2);
    assert_eq!(data["ready"], true);
    assert_eq!(status["meta"]["status"], "success");
    assert!(status["meta"]["message"].is_null());

    // London lost 08-06 (500) and 10-06 (garbled); Lisbon lost 10-06 only
    let london = &data["cities"][0];
    assert_eq!(london["name"], "London");
    assert_eq!(london["sunsets"], json!(["7:15:00 PM", "4:45:00 PM"]));
    assert_eq!(london["seconds_since_midnight"], json!([26100, 17100]));
    let lisbon = &data["cities"][1];
    assert_eq!(lisbon["sunsets"], json!(["7:30:00 PM", "7:15:00 PM", "4:45:00 PM"]));

    let failed = data["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 3);
    let london_failed: Vec<&str> = failed
        .iter()
        .filter(|f| f["city"] == "London")
        .map(|f| f["date"].as_str().unwrap())
        .collect();
    assert_eq!(london_failed, vec!["2022-08-06", "2022-10-06"]);

    let chart = http
        .get(format!("http://{}/api/chart.svg", addr))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!chart.contains("Loading..."));
    assert!(chart.contains("Sunsets in London and Lisbon"));
    assert!(chart.contains("width=\"900\""));
    assert!(chart.contains("7:15:00 PM"));
    assert!(chart.contains("Aug 06 2022"));
}

#[tokio::test]
async fn rejects_bad_canvas_sizes() {
    let state = AppState {
        config: Arc::new(config("http://127.0.0.1:9/json")),
        board: Arc::new(LoadBoard::new(&CITIES)),
        dates: Arc::new(vec!["2022-08-06".to_string()]),
    };
    let addr = serve(create_router(state)).await;
    let http = reqwest::Client::new();

    let zero = http
        .get(format!("http://{}/api/chart.svg?width=0&height=300", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(zero.status(), 400);
    let body: Value = zero.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("width"));

    let junk = http
        .get(format!("http://{}/api/chart.svg?width=wide", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(junk.status(), 400);

    let health: Value = http
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let page = http.get(format!("http://{}/", addr)).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("/api/chart.svg"));
}
