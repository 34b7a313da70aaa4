use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use tracing::{info, warn};

use crate::model::{City, FailedRequest, TimeOfDay};

/// What one city's fetch session produced.
#[derive(Clone, Debug)]
pub struct CityReport {
    pub city: City,
    pub dataset: Vec<TimeOfDay>,
    pub failed: Vec<FailedRequest>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CitySeries {
    pub city: City,
    pub sunsets: Vec<TimeOfDay>,
}

/// A consistent copy of the board, safe to render from.
#[derive(Clone, Debug, Serialize)]
pub struct BoardSnapshot {
    pub loaded: usize,
    pub expected: usize,
    /// Series in board order; a city appears once it has finished loading.
    pub series: Vec<CitySeries>,
    pub failed: Vec<FailedRequest>,
}

impl BoardSnapshot {
    pub fn is_ready(&self) -> bool {
        self.loaded == self.expected
    }

    pub fn series_for(&self, name: &str) -> Option<&CitySeries> {
        self.series.iter().find(|s| s.city.name == name)
    }
}

#[derive(Debug)]
struct BoardState {
    slots: Vec<(City, Option<Vec<TimeOfDay>>)>,
    failed: Vec<FailedRequest>,
    loaded: usize,
}

/// Shared load state: per-city datasets, the failed-request log and the
/// load counter.
///
/// Datasets only land here once their session has exhausted its work
/// queue, so anything a reader sees is final.
#[derive(Debug)]
pub struct LoadBoard {
    state: RwLock<BoardState>,
}

impl LoadBoard {
    pub fn new(cities: &[City]) -> Self {
        LoadBoard {
            state: RwLock::new(BoardState {
                slots: cities.iter().map(|c| (*c, None)).collect(),
                failed: Vec::new(),
                loaded: 0,
            }),
        }
    }

    /// Stores a finished session and bumps the load counter once for its city.
    pub fn publish(&self, report: CityReport) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let Some(index) = state.slots.iter().position(|(city, _)| *city == report.city) else {
            warn!("Ignoring report for unknown city {}", report.city.name);
            return;
        };
        if state.slots[index].1.is_some() {
            warn!("Ignoring duplicate report for {}", report.city.name);
            return;
        }

        state.failed.extend(report.failed);
        state.slots[index].1 = Some(report.dataset);
        state.loaded += 1;
        info!(
            "Load counter at {}/{} after {}",
            state.loaded,
            state.slots.len(),
            report.city.name
        );
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        BoardSnapshot {
            loaded: state.loaded,
            expected: state.slots.len(),
            series: state
                .slots
                .iter()
                .filter_map(|(city, dataset)| {
                    dataset.as_ref().map(|sunsets| CitySeries {
                        city: *city,
                        sunsets: sunsets.clone(),
                    })
                })
                .collect(),
            failed: state.failed.clone(),
        }
    }
}
