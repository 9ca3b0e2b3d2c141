#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The user's display preference. State is explicit: callers load it from the
/// persisted client state, cycle it on request, and persist the result. There
/// is no ambient global to mutate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn parse(value: &str) -> ThemePreference {
        match value {
            "light" => return ThemePreference::Light,
            "dark" => return ThemePreference::Dark,
            _ => return ThemePreference::System,
        }
    }

    pub fn cycle(self) -> ThemePreference {
        match self {
            ThemePreference::Light => return ThemePreference::Dark,
            ThemePreference::Dark => return ThemePreference::System,
            ThemePreference::System => return ThemePreference::Light,
        }
    }
}

impl ToString for ThemePreference {
    fn to_string(&self) -> String {
        match self {
            ThemePreference::Light => return String::from("light"),
            ThemePreference::Dark => return String::from("dark"),
            ThemePreference::System => return String::from("system"),
        }
    }
}
