use std::fmt;

/// Identifier of every screen the root container can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    Weather,
    Hourly,
    Daily,
    LoggedIn,
}

impl ViewName {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Weather => "weather",
            ViewName::Hourly => "hourly",
            ViewName::Daily => "daily",
            ViewName::LoggedIn => "logged in",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
