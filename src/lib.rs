pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod presenter;
pub mod state;
pub mod use_case;
pub mod view;
pub mod view_manager;
pub mod view_model;
pub mod view_name;
pub mod weather;
pub mod weather_type;

pub use app::{run_app, WeatherApp};
pub use config::{Args, Config};
pub use error::WeatherError;
