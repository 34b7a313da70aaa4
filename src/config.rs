use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "https://api.sunrise-sunset.org/json";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub api_url: String,
    /// Overall per-request timeout. `None` lets a hung request stall its city.
    pub request_timeout: Option<Duration>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let api_url = env::var("SUNSET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if api_url.trim().is_empty() {
            return Err(AppError::ConfigError("SUNSET_API_URL must not be empty".to_string()));
        }

        let request_timeout = match env::var("SUNSET_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(e.into()),
        };

        let canvas_width = parse_dimension("CANVAS_WIDTH", 960)?;
        let canvas_height = parse_dimension("CANVAS_HEIGHT", 640)?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            api_url,
            request_timeout,
            canvas_width,
            canvas_height,
        })
    }
}

fn parse_dimension(key: &str, default: u32) -> Result<u32> {
    match env::var(key) {
        Ok(raw) => match raw.parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            Ok(_) => Err(AppError::ConfigError(format!("{} must be positive", key))),
            Err(e) => Err(AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        },
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}

/// A zero timeout would fail every request before it is sent.
fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        Ok(_) => Err(AppError::ConfigError("SUNSET_REQUEST_TIMEOUT_SECS must be positive".to_string())),
        Err(e) => Err(AppError::ConfigError(format!("Invalid SUNSET_REQUEST_TIMEOUT_SECS: {}", e))),
    }
}
