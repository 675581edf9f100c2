use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A trimmed, non-empty location name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("City name must not be empty")]
pub struct EmptyCityQuery;

impl CityQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for CityQuery {
    type Error = EmptyCityQuery;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EmptyCityQuery);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for CityQuery {
    type Error = EmptyCityQuery;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for a location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

/// One forecast step as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    /// Rain volume over the last 3 hours, in mm.
    pub precipitation_3h: Option<f64>,
}

impl ForecastSample {
    pub fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Chronologically ordered forecast samples, horizon and step chosen by the provider.
pub type ForecastSet = Vec<ForecastSample>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: ForecastSet,
}

pub type FetchResult = Result<WeatherReport, FetchError>;

pub fn icon_url(code: &str) -> String {
    format!("{ICON_BASE_URL}/{code}@2x.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_is_trimmed() {
        let q = CityQuery::try_from("  London \n").expect("valid query");
        assert_eq!(q.as_str(), "London");
    }

    #[test]
    fn blank_city_query_is_rejected() {
        assert_eq!(CityQuery::try_from(""), Err(EmptyCityQuery));
        assert_eq!(CityQuery::try_from("   \t"), Err(EmptyCityQuery));
    }

    #[test]
    fn icon_url_points_at_cdn() {
        assert_eq!(icon_url("10d"), "https://openweathermap.org/img/wn/10d@2x.png");
    }

    #[test]
    fn sample_time_is_utc_instant() {
        let sample = ForecastSample {
            timestamp: 86_400,
            temperature: 0.0,
            humidity: 0,
            wind_speed: 0.0,
            description: String::new(),
            icon: String::new(),
            precipitation_3h: None,
        };
        assert_eq!(sample.time().to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }
}
