use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::board::BoardSnapshot;

#[derive(Deserialize)]
pub struct ChartQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Serialize)]
pub struct CityStatus {
    pub name: String,
    pub lat: String,
    pub lng: String,
    pub sunsets: Vec<String>,
    #[serde(rename = "seconds_since_midnight")]
    pub seconds: Vec<u32>,
}

#[derive(Serialize)]
pub struct FailedEntry {
    pub city: String,
    pub date: String,
    pub url: String,
    pub reason: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub loaded: usize,
    pub expected: usize,
    pub ready: bool,
    pub cities: Vec<CityStatus>,
    pub failed: Vec<FailedEntry>,
    pub checked_at: DateTime<Utc>,
}

impl StatusResponse {
    pub fn from_snapshot(snapshot: &BoardSnapshot, api_url: &str) -> Self {
        StatusResponse {
            loaded: snapshot.loaded,
            expected: snapshot.expected,
            ready: snapshot.is_ready(),
            cities: snapshot
                .series
                .iter()
                .map(|s| CityStatus {
                    name: s.city.name.to_string(),
                    lat: s.city.lat.to_string(),
                    lng: s.city.lng.to_string(),
                    sunsets: s.sunsets.iter().map(|t| t.raw().to_string()).collect(),
                    seconds: s.sunsets.iter().map(|t| t.seconds_since_midnight()).collect(),
                })
                .collect(),
            failed: snapshot
                .failed
                .iter()
                .map(|f| FailedEntry {
                    city: f.target.city.clone(),
                    date: f.target.date.clone(),
                    url: f.target.url(api_url),
                    reason: f.reason.clone(),
                })
                .collect(),
            checked_at: Utc::now(),
        }
    }
}
