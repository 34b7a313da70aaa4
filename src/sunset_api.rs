use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::model::{Target, TimeOfDay};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Anything that can answer "when is sunset for this target".
pub trait SunsetSource {
    fn fetch_sunset(&self, target: &Target) -> impl Future<Output = Result<TimeOfDay>> + Send;
}

#[derive(Deserialize)]
struct SunsetResponse {
    results: SunsetResults,
    status: Option<String>,
}

#[derive(Deserialize)]
struct SunsetResults {
    sunset: String,
}

/// Client for `api.sunrise-sunset.org` (or anything speaking its JSON shape).
#[derive(Clone, Debug)]
pub struct SunsetApiClient {
    base_url: String,
    timeout: Option<Duration>,
}

impl SunsetApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        SunsetApiClient {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SunsetSource for SunsetApiClient {
    async fn fetch_sunset(&self, target: &Target) -> Result<TimeOfDay> {
        let mut request = CLIENT.get(&self.base_url).query(&[
            ("lat", target.lat.as_str()),
            ("lng", target.lng.as_str()),
            ("date", target.date.as_str()),
        ]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        parse_sunset(&body)
    }
}

/// Pulls `results.sunset` out of an API body and validates it.
pub fn parse_sunset(body: &str) -> Result<TimeOfDay> {
    let parsed: SunsetResponse = serde_json::from_str(body)
        .map_err(|e| AppError::ParseError(format!("Unexpected response body: {}", e)))?;

    if let Some(status) = parsed.status.as_deref() {
        if status != "OK" {
            return Err(AppError::FetchError(format!("API returned status {}", status)));
        }
    }

    parsed.results.sunset.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_sunset_from_api_body() {
        let body = r#"{"results":{"sunrise":"4:29:51 AM","sunset":"7:30:00 PM","day_length":"15:00:09"},"status":"OK"}"#;
        let time = parse_sunset(body).unwrap();
        assert_eq!(time.raw(), "7:30:00 PM");
        assert_eq!(time.seconds_since_midnight(), 27000);
    }

    #[test]
    fn status_is_optional() {
        assert!(parse_sunset(r#"{"results":{"sunset":"4:01:22 PM"}}"#).is_ok());
    }

    #[test]
    fn rejects_bad_bodies() {
        assert!(matches!(parse_sunset("<html>"), Err(AppError::ParseError(_))));
        assert!(matches!(parse_sunset(r#"{"results":{}}"#), Err(AppError::ParseError(_))));
        assert!(matches!(
            parse_sunset(r#"{"results":{"sunset":"soon"},"status":"OK"}"#),
            Err(AppError::ParseError(_))
        ));
        assert!(matches!(
            parse_sunset(r#"{"results":{"sunset":"7:30:00 PM"},"status":"INVALID_DATE"}"#),
            Err(AppError::FetchError(_))
        ));
    }
}
