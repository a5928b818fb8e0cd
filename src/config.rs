use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info, warn};

use crate::state::DEFAULT_PET_TYPE;
use crate::weather::Units;

pub const API_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";
const HOME_ENV_FILE: &str = ".pet_weather.env";

#[derive(Debug, Clone, Parser)]
#[command(name = "pet_weather", version, about = "Current, hourly and daily weather for you and your pet")]
pub struct Args {
    /// City to look up as soon as the window opens
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long, value_enum, default_value_t = Units::Metric)]
    pub units: Units,

    /// Name shown on the settings screen (defaults to $USER)
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long, default_value = DEFAULT_PET_TYPE)]
    pub pet_type: String,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// .env file to load before the usual locations
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub city: Option<String>,
    pub units: Units,
    pub username: String,
    pub pet_type: String,
    pub api_base_url: String,
    pub api_key: Option<String>,
}

impl Config {
    /// Loads the first `.env` found, then reads the API key from the environment.
    pub fn load(args: Args) -> Self {
        load_env_file(args.env_file.as_deref());

        let api_key = env::var(API_KEY_VAR).ok().filter(|key| !key.trim().is_empty());
        match &api_key {
            Some(key) => info!("API key found (length: {})", key.len()),
            None => warn!("{API_KEY_VAR} is not set; lookups will fail until it is"),
        }

        Self::from_args(args, api_key, env::var("USER").ok())
    }

    pub fn from_args(args: Args, api_key: Option<String>, user: Option<String>) -> Self {
        let username = args
            .username
            .or(user)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "guest".to_string());

        Self {
            city: args.city.filter(|city| !city.trim().is_empty()),
            units: args.units,
            username,
            pet_type: args.pet_type,
            api_base_url: args.api_base_url,
            api_key,
        }
    }
}

/// Places a `.env` file may live, most specific first.
///
/// Packaged macOS apps run from `.app/Contents/MacOS/`, so the bundle's
/// `Contents/Resources` is searched right after the working directory.
pub fn candidate_env_paths(explicit: Option<&Path>, exe: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(explicit) = explicit {
        paths.push(explicit.to_path_buf());
    }
    paths.push(PathBuf::from(".env"));

    if let Some(exe_dir) = exe.and_then(Path::parent) {
        if let Some(contents_dir) = exe_dir.parent() {
            paths.push(contents_dir.join("Resources").join(".env"));
        }
        paths.push(exe_dir.join(".env"));
    }

    if let Some(home) = home {
        paths.push(home.join(HOME_ENV_FILE));
        paths.push(home.join(".env"));
    }
    paths
}

/// Loads the first candidate `.env` that exists and parses. Returns its path.
pub fn load_env_file(explicit: Option<&Path>) -> Option<PathBuf> {
    let exe = env::current_exe().ok();
    let home = env::var_os("HOME").map(PathBuf::from);
    let candidates = candidate_env_paths(explicit, exe.as_deref(), home.as_deref());

    for path in candidates {
        if !path.exists() {
            debug!("No .env at {}", path.display());
            continue;
        }
        match dotenv::from_path(&path) {
            Ok(()) => {
                info!("Loaded .env from {}", path.display());
                return Some(path);
            }
            Err(e) => warn!("Error loading .env from {}: {e}", path.display()),
        }
    }

    debug!("No .env file found; using the process environment only");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_paths_in_priority_order() {
        let paths = candidate_env_paths(
            Some(Path::new("/etc/pw.env")),
            Some(Path::new("/Applications/PetWeather.app/Contents/MacOS/pet_weather")),
            Some(Path::new("/home/sam")),
        );

        assert_eq!(
            paths,
            vec![
                PathBuf::from("/etc/pw.env"),
                PathBuf::from(".env"),
                PathBuf::from("/Applications/PetWeather.app/Contents/Resources/.env"),
                PathBuf::from("/Applications/PetWeather.app/Contents/MacOS/.env"),
                PathBuf::from("/home/sam/.pet_weather.env"),
                PathBuf::from("/home/sam/.env"),
            ]
        );
    }

    #[test]
    fn env_paths_without_context() {
        assert_eq!(candidate_env_paths(None, None, None), vec![PathBuf::from(".env")]);
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "pet_weather",
            "--city",
            "Paris",
            "--units",
            "imperial",
            "--pet-type",
            "cat",
        ])
        .unwrap();

        let config = Config::from_args(args, Some("k".to_string()), Some("sam".to_string()));

        assert_eq!(config.city.as_deref(), Some("Paris"));
        assert_eq!(config.units, Units::Imperial);
        assert_eq!(config.pet_type, "cat");
        assert_eq!(config.username, "sam");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["pet_weather", "--city", "  "]).unwrap();

        let config = Config::from_args(args, None, None);

        assert_eq!(config.city, None);
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.pet_type, DEFAULT_PET_TYPE);
        assert_eq!(config.username, "guest");
        assert!(config.api_key.is_none());
    }
}
