use async_trait::async_trait;
use serde::Deserialize;

use super::{WeatherInfo, WeatherResolver};
use crate::http::{FetchError, SharedFetcher};

pub struct OpenWeatherResolver {
    http: SharedFetcher,
    endpoint: String,
    lang: String,
    api_key: Option<String>,
}

impl OpenWeatherResolver {
    pub fn new(
        http: SharedFetcher,
        endpoint: impl Into<String>,
        lang: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            lang: lang.into(),
            api_key,
        }
    }

    async fn try_resolve(&self, city: &str) -> Result<WeatherInfo, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let query = [
            ("q", city.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
            ("lang", self.lang.clone()),
        ];
        let body = self.http.get_json(&self.endpoint, &query).await?;
        let current: CurrentWeather = serde_json::from_value(body)?;

        let description = current
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or(FetchError::MissingField("weather"))?;

        Ok(WeatherInfo::Live {
            description,
            temperature_c: current.main.temp,
        })
    }
}

#[async_trait]
impl WeatherResolver for OpenWeatherResolver {
    async fn resolve(&self, city: &str) -> Option<WeatherInfo> {
        match self.try_resolve(city).await {
            Ok(info) => Some(info),
            Err(FetchError::MissingApiKey) => {
                tracing::debug!("No weather API key configured, skipping lookup");
                None
            }
            Err(err) => {
                tracing::warn!(%city, %err, "Weather unavailable");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::fake::FakeFetcher;

    const URL: &str = "https://weather.test/data/2.5/weather";

    fn resolver(fake: Arc<FakeFetcher>, key: Option<&str>) -> OpenWeatherResolver {
        OpenWeatherResolver::new(fake, URL, "kr", key.map(str::to_string))
    }

    #[tokio::test]
    async fn maps_temperature_and_description() {
        let fake = Arc::new(FakeFetcher::default().with(
            URL,
            r#"{"main": {"temp": 9.5, "humidity": 40}, "weather": [{"description": "mist"}, {"description": "fog"}]}"#,
        ));
        let info = resolver(fake.clone(), Some("secret")).resolve("Busan").await;
        assert_eq!(
            info,
            Some(WeatherInfo::Live {
                description: "mist".into(),
                temperature_c: 9.5
            })
        );

        let requests = fake.requests.lock().unwrap();
        let (url, query) = &requests[0];
        assert_eq!(url, URL);
        assert!(query.contains(&("q".into(), "Busan".into())));
        assert!(query.contains(&("appid".into(), "secret".into())));
        assert!(query.contains(&("units".into(), "metric".into())));
        assert!(query.contains(&("lang".into(), "kr".into())));
    }

    #[tokio::test]
    async fn missing_key_skips_request() {
        let fake = Arc::new(FakeFetcher::default());
        assert_eq!(resolver(fake.clone(), None).resolve("Seoul").await, None);
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn malformed_or_failed_response_is_unavailable() {
        let fake = Arc::new(FakeFetcher::default().with(URL, r#"{"main": {}, "weather": []}"#));
        assert_eq!(resolver(fake, Some("k")).resolve("Seoul").await, None);

        let fake = Arc::new(FakeFetcher::default().with(URL, r#"{"main": {"temp": 3.0}, "weather": []}"#));
        assert_eq!(resolver(fake, Some("k")).resolve("Seoul").await, None);

        let unreachable = Arc::new(FakeFetcher::default());
        assert_eq!(resolver(unreachable, Some("k")).resolve("Seoul").await, None);
    }
}
