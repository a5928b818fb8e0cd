//! The weather lookup use case: input validation, the gateway seam and the
//! mapping from a raw forecast to what a screen displays.

use std::fmt;

use log::{debug, info};

use crate::error::WeatherError;
use crate::view_name::ViewName;
use crate::weather::{self, Forecast, Location, Units};

/// Which of the three weather screens a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherMode {
    Current,
    Hourly,
    Daily,
}

impl WeatherMode {
    pub const ALL: [WeatherMode; 3] = [WeatherMode::Current, WeatherMode::Hourly, WeatherMode::Daily];

    pub fn view_name(self) -> ViewName {
        match self {
            WeatherMode::Current => ViewName::Weather,
            WeatherMode::Hourly => ViewName::Hourly,
            WeatherMode::Daily => ViewName::Daily,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherMode::Current => "Current",
            WeatherMode::Hourly => "Hourly",
            WeatherMode::Daily => "Daily",
        }
    }
}

impl fmt::Display for WeatherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a successful lookup, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherOutputData {
    pub city: String,
    pub temperature: String,
    pub condition: String,
    pub description: String,
}

/// Outcome delivered to a presenter.
pub type WeatherOutcome = Result<WeatherOutputData, WeatherError>;

/// Source of geocoding and forecast data.
#[allow(async_fn_in_trait)]
pub trait WeatherGateway {
    fn units(&self) -> Units;

    /// Resolves a free-form city name to the best matching location.
    async fn locate(&self, city: &str) -> Result<Location, WeatherError>;

    async fn forecast(&self, location: &Location) -> Result<Forecast, WeatherError>;
}

pub struct WeatherInteractor<G> {
    gateway: G,
}

impl<G: WeatherGateway> WeatherInteractor<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    #[cfg(test)]
    pub(crate) fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn execute(&self, city: &str, mode: WeatherMode) -> WeatherOutcome {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        debug!("Locating {city}");
        let location = self.gateway.locate(city).await?;
        let forecast = self.gateway.forecast(&location).await?;
        info!("Fetched {mode} weather for {}", location.name);

        Ok(weather::build_report(mode, &location, &forecast, self.gateway.units()))
    }
}
