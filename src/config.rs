//! Support for library configuration options

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Weekday;
use csscolorparser::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

/// The environment variable that overrides the default API base URL
pub const API_URL_ENV_VAR: &str = "TASKGRID_API_URL";

/// The API base URL used when running against a local backend
pub const LOCAL_API_URL: &str = "http://localhost:8080/api";
/// The API base URL of the hosted backend
pub const HOSTED_API_URL: &str = "https://task-project-backend-35fp.onrender.com/api";

/// How many days ahead a task is considered "upcoming"
pub const DEFAULT_HORIZON_DAYS: i64 = 7;
/// The longest accepted "upcoming" horizon (about a century)
pub const MAX_HORIZON_DAYS: i64 = 36_500;
/// How many status indicators a calendar cell displays before collapsing the rest into a count
pub const DEFAULT_MAX_INDICATORS: usize = 3;

/// The base URL of the task store REST API.
/// It defaults to the content of `$TASKGRID_API_URL`, or to a URL that depends on `$HOSTNAME` (see [`api_base_url_for_host`]).
/// Feel free to override it when initing this library.
pub static API_BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    let url = std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| {
        let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        api_base_url_for_host(&hostname).to_string()
    });
    Arc::new(Mutex::new(url))
});

/// Returns the API base URL a client should use when served from `hostname`
pub fn api_base_url_for_host(hostname: &str) -> &'static str {
    if hostname == "localhost" || hostname == "127.0.0.1" {
        LOCAL_API_URL
    } else {
        HOSTED_API_URL
    }
}

/// Parse the current value of [`API_BASE_URL`]
pub fn api_base_url() -> Result<Url, url::ParseError> {
    let raw = match API_BASE_URL.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    Url::parse(&raw)
}

/// Build an opaque color from 8-bit components
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb_u8(r, g, b)
}


/// The colors used to display the status of a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub completed: Color,
    pub overdue: Color,
    pub pending: Color,
    /// Used for the "upcoming" dashboard counter
    pub upcoming: Color,
    /// Used for the "total" dashboard counter
    pub total: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            completed: rgb(0x10, 0xb9, 0x81),
            overdue: rgb(0xef, 0x44, 0x44),
            pending: rgb(0xf5, 0x9e, 0x0b),
            upcoming: rgb(0x8b, 0x5c, 0xf6),
            total: rgb(0x66, 0x7e, 0xea),
        }
    }
}


/// Display settings shared by every view
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// See [`DEFAULT_HORIZON_DAYS`]
    pub horizon_days: i64,
    /// The first column of the calendar grid
    pub week_start: Weekday,
    /// See [`DEFAULT_MAX_INDICATORS`]
    pub max_indicators: usize,
    pub palette: Palette,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            week_start: Weekday::Sun,
            max_indicators: DEFAULT_MAX_INDICATORS,
            palette: Palette::default(),
        }
    }
}

impl ViewSettings {
    /// Load settings from a JSON file.
    /// Missing fields get their default values.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let settings: Self = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };
        Ok(settings.sanitized())
    }

    /// Replace nonsensical values with the defaults
    pub fn sanitized(mut self) -> Self {
        if self.horizon_days < 0 {
            log::warn!("Negative horizon ({} days), using {} instead", self.horizon_days, DEFAULT_HORIZON_DAYS);
            self.horizon_days = DEFAULT_HORIZON_DAYS;
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            log::warn!("Horizon of {} days is too long, using {} instead", self.horizon_days, MAX_HORIZON_DAYS);
            self.horizon_days = MAX_HORIZON_DAYS;
        }
        if self.max_indicators == 0 {
            self.max_indicators = DEFAULT_MAX_INDICATORS;
        }
        self
    }

    /// The horizon, clamped to `0..=MAX_HORIZON_DAYS` days
    pub fn horizon(&self) -> chrono::Duration {
        chrono::Duration::days(self.horizon_days.max(0).min(MAX_HORIZON_DAYS))
    }
}
