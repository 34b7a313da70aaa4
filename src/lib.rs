pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod render;
pub mod sunset_api;

use std::sync::Arc;
use board::LoadBoard;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub board: Arc<LoadBoard>,
    pub dates: Arc<Vec<String>>,
}
