//! Display records for each screen.

use crate::view_name::ViewName;

pub const DEFAULT_PET_TYPE: &str = "dog";

/// What a weather screen (current, hourly or daily) shows.
///
/// `error_message` is `None` after a successful fetch and `Some` only while a
/// failure waits to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherState {
    pub city: String,
    pub temperature: String,
    pub condition: String,
    pub description: String,
    pub error_message: Option<String>,
    pub pet_type: String,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            city: String::new(),
            temperature: String::new(),
            condition: String::new(),
            description: String::new(),
            error_message: None,
            pet_type: DEFAULT_PET_TYPE.to_string(),
        }
    }
}

impl WeatherState {
    pub fn with_pet_type(pet_type: impl Into<String>) -> Self {
        Self {
            pet_type: pet_type.into(),
            ..Self::default()
        }
    }

    pub fn has_report(&self) -> bool {
        !self.city.is_empty()
    }
}

/// The home/settings screen of a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedInState {
    pub username: String,
    pub pet_type: String,
    /// Screen the user left to come here; `None` until they have left one.
    pub last_view: Option<ViewName>,
}

impl LoggedInState {
    pub fn new(username: impl Into<String>, pet_type: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            pet_type: pet_type.into(),
            last_view: None,
        }
    }
}
