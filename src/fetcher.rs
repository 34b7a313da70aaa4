use std::collections::VecDeque;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::board::{CityReport, LoadBoard};
use crate::model::{City, FailedRequest, Target, TimeOfDay, targets_for};
use crate::sunset_api::SunsetSource;

/// Sequential fetch of one city's sunsets.
///
/// Targets are attempted in date order with at most one request in flight.
/// A target that fails is logged, recorded and never tried again.
#[derive(Debug)]
pub struct FetchSession {
    city: City,
    work: VecDeque<Target>,
    dataset: Vec<TimeOfDay>,
    failed: Vec<FailedRequest>,
}

impl FetchSession {
    pub fn new(city: City, dates: &[String]) -> Self {
        FetchSession {
            city,
            work: targets_for(&city, dates).into(),
            dataset: Vec::with_capacity(dates.len()),
            failed: Vec::new(),
        }
    }

    pub async fn run<S: SunsetSource>(mut self, source: &S) -> CityReport {
        while let Some(target) = self.work.pop_front() {
            match source.fetch_sunset(&target).await {
                Ok(sunset) => {
                    debug!("{}: sunset {}", target, sunset);
                    self.dataset.push(sunset);
                }
                Err(err) => {
                    warn!("Something went wrong with {}: {}", target, err);
                    self.failed.push(FailedRequest {
                        target,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let raw: Vec<&str> = self.dataset.iter().map(TimeOfDay::raw).collect();
        info!(
            "{} loaded {} sunsets ({} failed): {:?}",
            self.city.name,
            self.dataset.len(),
            self.failed.len(),
            raw
        );

        CityReport {
            city: self.city,
            dataset: self.dataset,
            failed: self.failed,
        }
    }
}

/// Starts one fetch task per city. Cities run concurrently; each publishes
/// to the board when its work queue is exhausted.
pub fn spawn_fetches<S>(
    board: Arc<LoadBoard>,
    source: Arc<S>,
    cities: &[City],
    dates: &[String],
) -> Vec<JoinHandle<()>>
where
    S: SunsetSource + Send + Sync + 'static,
{
    cities
        .iter()
        .map(|city| {
            let session = FetchSession::new(*city, dates);
            let board = Arc::clone(&board);
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let report = session.run(source.as_ref()).await;
                board.publish(report);
            })
        })
        .collect()
}
