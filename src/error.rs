use thiserror::Error;

/// Failures of the weather lookup. The `Display` text is what the user sees
/// in the error dialog.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    EmptyCity,
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("API Key Missing: please set OPENWEATHERMAP_API_KEY in the environment or a .env file.")]
    MissingApiKey,
    #[error("Failed to connect to the weather service: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Weather service error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse weather data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to start the fetch runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
