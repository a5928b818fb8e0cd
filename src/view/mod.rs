//! egui screens. Views only render the latest snapshot of their view-model
//! and forward user actions to a controller.

pub mod icon;
pub mod logged_in_view;
pub mod weather_view;

pub use logged_in_view::LoggedInView;
pub use weather_view::WeatherView;
