//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client (current conditions + forecast, fetched concurrently)
//! - Forecast grouping by calendar day
//! - Persisted search history and theme preference
//! - The dashboard orchestrator that ties them together
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod error;
pub mod forecast;
pub mod history;
pub mod model;
pub mod provider;
pub mod store;
pub mod theme;

pub use app::{Dashboard, Event, ViewState, transition};
pub use config::Config;
pub use error::{ErrorKind, FetchError};
pub use forecast::{DayBucket, DayBuckets, group_by_day, group_by_day_in, hour_label};
pub use history::{HISTORY_LIMIT, SearchHistory, SearchHistoryStore};
pub use model::{
    CityQuery, CurrentConditions, EmptyCityQuery, FetchResult, ForecastSample, ForecastSet,
    WeatherReport, icon_url,
};
pub use provider::{WeatherProvider, combine, openweather::OpenWeatherClient, provider_from_config};
pub use store::{JsonFileStore, MemoryStore, Store};
pub use theme::{Theme, ThemeSetting};

use std::path::Path;

const HISTORY_FILE: &str = "search_history.json";
const THEME_FILE: &str = "theme.json";

/// Open the persisted history and theme kept under `data_dir`.
///
/// The theme falls back to the host color-scheme preference on first run.
pub fn open_state(data_dir: &Path) -> (SearchHistoryStore, ThemeSetting) {
    let history = SearchHistoryStore::load(Box::new(JsonFileStore::<Vec<String>>::new(
        data_dir.join(HISTORY_FILE),
    )));
    let theme = ThemeSetting::load(
        Box::new(JsonFileStore::<Theme>::new(data_dir.join(THEME_FILE))),
        Theme::from_environment(),
    );
    (history, theme)
}
