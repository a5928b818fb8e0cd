use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::WeatherError;
use crate::use_case::{WeatherGateway, WeatherMode, WeatherOutputData};

const HOURLY_SLOTS: usize = 12;
const DAILY_SLOTS: usize = 7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn query_value(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

// API response structs
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_deg: u16,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hourly {
    pub dt: i64,
    pub temp: f64,
    #[serde(default)]
    pub pop: f64,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Daily {
    pub dt: i64,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub summary: String,
    pub temp: DailyTemp,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    /// Seconds east of UTC for the forecast location.
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: Current,
    #[serde(default)]
    pub hourly: Vec<Hourly>,
    #[serde(default)]
    pub daily: Vec<Daily>,
}

/// OpenWeatherMap geocoding + One Call 3.0.
pub struct OpenWeatherGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    units: Units,
}

impl OpenWeatherGateway {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, units: Units) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            units,
        }
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("{url} answered {status}");
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl WeatherGateway for OpenWeatherGateway {
    fn units(&self) -> Units {
        self.units
    }

    async fn locate(&self, city: &str) -> Result<Location, WeatherError> {
        let key = self.api_key()?.to_string();
        let matches: Vec<Location> = self
            .get_json(
                "/geo/1.0/direct",
                &[("q", city.to_string()), ("limit", "1".to_string()), ("appid", key)],
            )
            .await?;

        matches
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    async fn forecast(&self, location: &Location) -> Result<Forecast, WeatherError> {
        let key = self.api_key()?.to_string();
        self.get_json(
            "/data/3.0/onecall",
            &[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("units", self.units.query_value().to_string()),
                ("exclude", "minutely,alerts".to_string()),
                ("appid", key),
            ],
        )
        .await
    }
}

pub fn build_report(
    mode: WeatherMode,
    location: &Location,
    forecast: &Forecast,
    units: Units,
) -> WeatherOutputData {
    let (temperature, condition, description) = match mode {
        WeatherMode::Current => current_report(forecast, units),
        WeatherMode::Hourly => hourly_report(forecast, units),
        WeatherMode::Daily => daily_report(forecast, units),
    };

    WeatherOutputData {
        city: location.name.clone(),
        temperature,
        condition,
        description,
    }
}

fn current_report(forecast: &Forecast, units: Units) -> (String, String, String) {
    let current = &forecast.current;
    let today = forecast.daily.first();

    let mut lines = vec![
        format!("Feels like {}", format_temperature(current.feels_like, units)),
        format!("Humidity: {}%", current.humidity),
        format!(
            "Wind: {:.1} {} {}",
            current.wind_speed,
            units.speed_suffix(),
            degrees_to_cardinal(current.wind_deg)
        ),
    ];
    if let Some(today) = today {
        lines.push(format!(
            "Chance of {} Today: {:.0}%",
            precipitation_label(&today.weather),
            precipitation_percent(today.pop)
        ));
        if !today.summary.is_empty() {
            lines.insert(0, format!("Summary: {}", today.summary));
        }
    }

    (
        format_temperature(current.temp, units),
        condition_text(&current.weather),
        lines.join("\n"),
    )
}

fn hourly_report(forecast: &Forecast, units: Units) -> (String, String, String) {
    let Some(next) = forecast.hourly.first() else {
        return current_report(forecast, units);
    };

    let lines: Vec<String> = forecast
        .hourly
        .iter()
        .take(HOURLY_SLOTS)
        .map(|hour| {
            format!(
                "{}  {}  {}  ({:.0}% precip)",
                local_time(hour.dt, forecast.timezone_offset, "%H:%M"),
                format_temperature(hour.temp, units),
                condition_text(&hour.weather).to_lowercase(),
                precipitation_percent(hour.pop)
            )
        })
        .collect();

    (
        format_temperature(next.temp, units),
        condition_text(&next.weather),
        lines.join("\n"),
    )
}

fn daily_report(forecast: &Forecast, units: Units) -> (String, String, String) {
    let Some(today) = forecast.daily.first() else {
        return current_report(forecast, units);
    };

    let lines: Vec<String> = forecast
        .daily
        .iter()
        .take(DAILY_SLOTS)
        .map(|day| {
            format!(
                "{}  H: {} / L: {}  {}  ({:.0}% precip)",
                local_time(day.dt, forecast.timezone_offset, "%a %b %d"),
                format_temperature(day.temp.max, units),
                format_temperature(day.temp.min, units),
                condition_text(&day.weather).to_lowercase(),
                precipitation_percent(day.pop)
            )
        })
        .collect();

    (
        format!(
            "H: {} / L: {}",
            format_temperature(today.temp.max, units),
            format_temperature(today.temp.min, units)
        ),
        condition_text(&today.weather),
        lines.join("\n"),
    )
}

pub fn format_temperature(value: f64, units: Units) -> String {
    format!("{:.1}{}", value, units.temperature_suffix())
}

fn condition_text(conditions: &[Condition]) -> String {
    conditions
        .first()
        .map(|c| capitalize_first_letter(&c.description))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn precipitation_label(conditions: &[Condition]) -> &'static str {
    let is_snow = conditions
        .first()
        .is_some_and(|c| c.description.to_lowercase().contains("snow"));
    if is_snow {
        "Snow"
    } else {
        "Rain"
    }
}

/// Probability of precipitation as a whole percentage; `pop` is clamped to 0..=1.
pub fn precipitation_percent(pop: f64) -> f64 {
    (pop.clamp(0.0, 1.0) * 100.0).round()
}

fn local_time(dt: i64, offset_secs: i32, pattern: &str) -> String {
    let offset = FixedOffset::east_opt(offset_secs).unwrap_or_else(|| Utc.fix());
    match Utc.timestamp_opt(dt, 0).single() {
        Some(utc) => {
            let local: DateTime<FixedOffset> = utc.with_timezone(&offset);
            local.format(pattern).to_string()
        }
        None => "--".to_string(),
    }
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn degrees_to_cardinal(degrees: u16) -> &'static str {
    let dirs = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE",
        "S", "SSW", "SW", "WSW", "W", "WNW", "NW", "NNW",
    ];
    let index = (((degrees as f32 + 11.25) / 22.5) as usize) % 16;
    dirs[index]
}
