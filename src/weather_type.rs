/// Icon family for a condition text such as "light snow" or "Few clouds".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherType {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
    Unknown,
}

pub fn determine_weather_type(condition: &str) -> WeatherType {
    let desc_lower = condition.to_lowercase();
    if desc_lower.trim().is_empty() {
        WeatherType::Unknown
    } else if desc_lower.contains("thunder") || desc_lower.contains("storm") {
        WeatherType::Thunderstorm
    } else if desc_lower.contains("snow") || desc_lower.contains("sleet") {
        WeatherType::Snow
    } else if desc_lower.contains("rain") || desc_lower.contains("drizzle") {
        WeatherType::Rain
    } else if desc_lower.contains("fog") || desc_lower.contains("mist") || desc_lower.contains("haze") {
        WeatherType::Fog
    } else if desc_lower.contains("few clouds") || desc_lower.contains("scattered") || desc_lower.contains("partly") {
        WeatherType::PartlyCloudy
    } else if desc_lower.contains("cloud") || desc_lower.contains("overcast") {
        WeatherType::Cloudy
    } else {
        WeatherType::Clear
    }
}
