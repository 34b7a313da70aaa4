use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{AppError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub lat: &'static str,
    pub lng: &'static str,
    /// Series colour as RGB.
    #[serde(skip)]
    pub color: (u8, u8, u8),
}

pub const LONDON: City = City {
    name: "London",
    lat: "51.5073219",
    lng: "-0.1276474",
    color: (0x97, 0x3A, 0xA8),
};

pub const LISBON: City = City {
    name: "Lisbon",
    lat: "38.736946",
    lng: "-9.142685",
    color: (0xEE, 0x9B, 0x00),
};

pub const CITIES: [City; 2] = [LONDON, LISBON];

pub const DATES: [&str; 7] = [
    "2022-08-06",
    "2022-09-06",
    "2022-10-06",
    "2022-11-06",
    "2022-12-06",
    "2023-01-06",
    "2023-02-06",
];

pub fn default_dates() -> Vec<String> {
    DATES.iter().map(|d| d.to_string()).collect()
}

/// One request unit: a city's coordinates on one date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Target {
    pub city: String,
    pub lat: String,
    pub lng: String,
    pub date: String,
}

impl Target {
    pub fn new(city: &City, date: &str) -> Self {
        Target {
            city: city.name.to_string(),
            lat: city.lat.to_string(),
            lng: city.lng.to_string(),
            date: date.to_string(),
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}?lat={}&lng={}&date={}", base_url, self.lat, self.lng, self.date)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {}) on {}", self.city, self.lat, self.lng, self.date)
    }
}

/// Builds one target per date, in date order.
pub fn targets_for(city: &City, dates: &[String]) -> Vec<Target> {
    dates.iter().map(|date| Target::new(city, date)).collect()
}

/// A `H:MM:SS AM/PM` time as returned by the sunrise-sunset API.
///
/// The raw string is kept so charts can label points with exactly what
/// the API said.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeOfDay {
    raw: String,
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl TimeOfDay {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Seconds counted on the 12-hour dial: `h*3600 + m*60 + s`.
    ///
    /// The meridiem is not added, so `"7:30:00 PM"` is 27000. Always below 86400.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AppError::ParseError(format!("Invalid time of day: {:?}", s));

        let trimmed = s.trim();
        let (clock, meridiem) = trimmed.split_once(' ').ok_or_else(invalid)?;
        if !matches!(meridiem.trim(), "AM" | "PM") {
            return Err(invalid());
        }

        let mut parts = clock.split(':');
        let mut next_field = |max: u32| -> Result<u32> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let value = part.parse::<u32>().map_err(|_| invalid())?;
            if value > max {
                return Err(invalid());
            }
            Ok(value)
        };
        let hours = next_field(12)?;
        let minutes = next_field(59)?;
        let seconds = next_field(59)?;
        if parts.next().is_some() || hours == 0 {
            return Err(invalid());
        }

        Ok(TimeOfDay {
            raw: trimmed.to_string(),
            hours,
            minutes,
            seconds,
        })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

pub fn seconds_since_midnight(time: &str) -> Result<u32> {
    Ok(time.parse::<TimeOfDay>()?.seconds_since_midnight())
}

/// A target that failed its single attempt and was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedRequest {
    pub target: Target,
    pub reason: String,
}
