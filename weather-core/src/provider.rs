use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    model::{CityQuery, CurrentConditions, FetchResult, ForecastSet, WeatherReport},
    error::FetchError,
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

/// Source of current conditions plus forecast for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &CityQuery) -> FetchResult;
}

/// Merge the outcomes of the two concurrent requests of one query.
///
/// Partial success is never surfaced. When both fail, the higher-priority
/// error wins (see [`crate::ErrorKind::priority`]).
pub fn combine(
    current: Result<CurrentConditions, FetchError>,
    forecast: Result<ForecastSet, FetchError>,
) -> FetchResult {
    match (current, forecast) {
        (Ok(current), Ok(forecast)) => Ok(WeatherReport { current, forecast }),
        (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
        (Err(current_err), Err(forecast_err)) => Err(current_err.prefer(forecast_err)),
    }
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.require_api_key()?.to_owned();

    let client = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherClient::with_base_url(api_key, base_url),
        None => OpenWeatherClient::new(api_key),
    };

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            name: "London".into(),
            temperature: 12.0,
            feels_like: 10.5,
            humidity: 80,
            wind_speed: 4.1,
            description: "light rain".into(),
            icon: "10d".into(),
        }
    }

    #[test]
    fn combine_success() {
        let report = combine(Ok(conditions()), Ok(Vec::new())).expect("both succeeded");
        assert_eq!(report.current.name, "London");
        assert!(report.forecast.is_empty());
    }

    #[test]
    fn combine_fails_if_either_fails() {
        let err = combine(Ok(conditions()), Err(ErrorKind::NotFound.into())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = combine(Err(ErrorKind::NetworkUnavailable.into()), Ok(Vec::new())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NetworkUnavailable);
    }

    #[test]
    fn combine_both_failed_is_order_independent() {
        let a = combine(
            Err(ErrorKind::NotFound.into()),
            Err(ErrorKind::Unauthorized.into()),
        )
        .unwrap_err();
        let b = combine(
            Err(ErrorKind::Unauthorized.into()),
            Err(ErrorKind::NotFound.into()),
        )
        .unwrap_err();

        assert_eq!(a.kind, ErrorKind::Unauthorized);
        assert_eq!(b.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
