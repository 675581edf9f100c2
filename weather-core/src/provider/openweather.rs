use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{ErrorKind, FetchError},
    model::{CityQuery, CurrentConditions, FetchResult, ForecastSample, ForecastSet},
    provider::combine,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        CurrentConditions::try_from(parsed)
    }

    async fn fetch_forecast(&self, city: &CityQuery) -> Result<ForecastSet, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;
        parsed.list.into_iter().map(ForecastSample::try_from).collect()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &CityQuery,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(endpoint, error = %err, "OpenWeather request failed");
                FetchError::new(ErrorKind::from_transport(&err))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            tracing::warn!(endpoint, error = %err, "Failed to read OpenWeather response body");
            FetchError::new(ErrorKind::from_transport(&err))
        })?;

        if !status.is_success() {
            tracing::warn!(
                endpoint,
                %status,
                body = %truncate_body(&body),
                "OpenWeather returned an error status"
            );
            return Err(FetchError::new(ErrorKind::from_status(status)));
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(
                endpoint,
                error = %err,
                body = %truncate_body(&body),
                "Failed to parse OpenWeather JSON"
            );
            FetchError::new(ErrorKind::InvalidResponse)
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    rain: Option<OwRain>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_weather(weather: Vec<OwWeather>) -> Result<OwWeather, FetchError> {
    weather.into_iter().next().ok_or_else(|| {
        tracing::warn!("OpenWeather payload has an empty `weather` array");
        FetchError::new(ErrorKind::InvalidResponse)
    })
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = first_weather(parsed.weather)?;
        let feels_like = parsed.main.feels_like.ok_or_else(|| {
            tracing::warn!("OpenWeather current payload lacks `main.feels_like`");
            FetchError::new(ErrorKind::InvalidResponse)
        })?;

        Ok(CurrentConditions {
            name: parsed.name,
            temperature: parsed.main.temp,
            feels_like,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            description: weather.description,
            icon: weather.icon,
        })
    }
}

impl TryFrom<OwForecastEntry> for ForecastSample {
    type Error = FetchError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let weather = first_weather(entry.weather)?;

        Ok(ForecastSample {
            timestamp: entry.dt,
            temperature: entry.main.temp,
            humidity: entry.main.humidity,
            wind_speed: entry.wind.speed,
            description: weather.description,
            icon: weather.icon,
            precipitation_3h: entry.rain.and_then(|r| r.three_hours),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(&self, city: &CityQuery) -> FetchResult {
        tracing::debug!(city = %city, "Fetching current conditions and forecast");

        let (current, forecast) = tokio::join!(self.fetch_current(city), self.fetch_forecast(city));

        combine(current, forecast)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
