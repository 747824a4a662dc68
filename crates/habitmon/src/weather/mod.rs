mod live;
mod table;

use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;

pub use live::OpenWeatherResolver;
pub use table::{STATIC_FALLBACK, StaticWeather};

use crate::{config::WeatherProvider, habits::InputError, http::SharedFetcher};

pub type SharedWeather = Arc<dyn WeatherResolver>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    #[default]
    Seoul,
    Busan,
    Incheon,
    Daegu,
    Daejeon,
    Gwangju,
    Suwon,
    Ulsan,
    Jeju,
    Sejong,
}

impl City {
    pub const ALL: [City; 10] = [
        City::Seoul,
        City::Busan,
        City::Incheon,
        City::Daegu,
        City::Daejeon,
        City::Gwangju,
        City::Suwon,
        City::Ulsan,
        City::Jeju,
        City::Sejong,
    ];

    pub fn name(self) -> &'static str {
        match self {
            City::Seoul => "Seoul",
            City::Busan => "Busan",
            City::Incheon => "Incheon",
            City::Daegu => "Daegu",
            City::Daejeon => "Daejeon",
            City::Gwangju => "Gwangju",
            City::Suwon => "Suwon",
            City::Ulsan => "Ulsan",
            City::Jeju => "Jeju",
            City::Sejong => "Sejong",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| InputError::UnknownCity(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeatherInfo {
    Live {
        description: String,
        temperature_c: f64,
    },
    Static {
        summary: String,
    },
}

impl fmt::Display for WeatherInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherInfo::Live {
                description,
                temperature_c,
            } => write!(f, "{description} / {temperature_c:.1}℃"),
            WeatherInfo::Static { summary } => f.write_str(summary),
        }
    }
}

#[async_trait]
pub trait WeatherResolver: Send + Sync {
    /// Resolve the weather for a city, or `None` when it cannot be determined.
    async fn resolve(&self, city: &str) -> Option<WeatherInfo>;
}

/// Build the resolver selected by configuration. `api_key_override` takes
/// precedence over configured keys for the live provider.
pub fn create_resolver(
    provider: &WeatherProvider,
    http: SharedFetcher,
    api_key_override: Option<String>,
) -> SharedWeather {
    match provider {
        WeatherProvider::Static => Arc::new(StaticWeather),
        WeatherProvider::OpenWeatherMap { endpoint, lang, .. } => {
            let api_key = api_key_override.or_else(|| provider.api_key());
            Arc::new(OpenWeatherResolver::new(
                http,
                endpoint.clone(),
                lang.clone(),
                api_key,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeFetcher;

    #[test]
    fn city_parses_case_insensitively() {
        assert_eq!("seoul".parse::<City>().unwrap(), City::Seoul);
        assert_eq!(" JEJU ".parse::<City>().unwrap(), City::Jeju);
        assert_eq!(
            "Tokyo".parse::<City>(),
            Err(InputError::UnknownCity("Tokyo".into()))
        );
    }

    #[test]
    fn live_weather_display() {
        let info = WeatherInfo::Live {
            description: "light rain".into(),
            temperature_c: 12.34,
        };
        assert_eq!(info.to_string(), "light rain / 12.3℃");
    }

    #[tokio::test]
    async fn override_key_enables_live_provider() {
        let fake = Arc::new(FakeFetcher::default().with(
            "https://weather.test",
            r#"{"main": {"temp": 21.0}, "weather": [{"description": "clear sky"}]}"#,
        ));
        let provider = WeatherProvider::OpenWeatherMap {
            api_key: None,
            api_key_env: "HABITMON_TEST_UNSET_WEATHER_KEY".into(),
            endpoint: "https://weather.test".into(),
            lang: "en".into(),
        };
        let resolver = create_resolver(&provider, fake, Some("k".into()));
        let info = resolver.resolve("Seoul").await.expect("weather");
        assert_eq!(info.to_string(), "clear sky / 21.0℃");
    }

    #[tokio::test]
    async fn static_provider_never_touches_network() {
        let fake = Arc::new(FakeFetcher::default());
        let resolver = create_resolver(&WeatherProvider::Static, fake.clone(), Some("k".into()));
        assert!(resolver.resolve("Busan").await.is_some());
        assert_eq!(fake.request_count(), 0);
    }
}
