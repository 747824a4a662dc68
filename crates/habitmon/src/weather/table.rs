use async_trait::async_trait;

use super::{City, WeatherInfo, WeatherResolver};

pub const STATIC_FALLBACK: &str = "🌈 Weather unknown, bring an umbrella just in case";

/// Offline resolver backed by a fixed per-city table.
pub struct StaticWeather;

impl StaticWeather {
    pub fn lookup(city: &str) -> &'static str {
        match city.parse::<City>() {
            Ok(city) => summary(city),
            Err(_) => STATIC_FALLBACK,
        }
    }
}

fn summary(city: City) -> &'static str {
    match city {
        City::Seoul => "☀️ Clear skies, 18℃",
        City::Busan => "🌤 Sunny with a sea breeze, 20℃",
        City::Incheon => "🌫 Hazy morning, 16℃",
        City::Daegu => "🔥 Hot and dry, 24℃",
        City::Daejeon => "⛅ Partly cloudy, 17℃",
        City::Gwangju => "🌦 Passing showers, 19℃",
        City::Suwon => "☁️ Overcast, 15℃",
        City::Ulsan => "🌬 Windy, 18℃",
        City::Jeju => "🌊 Mild and humid, 21℃",
        City::Sejong => "🍃 Cool breeze, 16℃",
    }
}

#[async_trait]
impl WeatherResolver for StaticWeather {
    async fn resolve(&self, city: &str) -> Option<WeatherInfo> {
        Some(WeatherInfo::Static {
            summary: Self::lookup(city).to_string(),
        })
    }
}
