#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;

use crate::domain::models::ThemePreference;

pub struct Themes {}

impl Themes {
    /// Maps the display preference to a highlight theme. A terminal cannot
    /// query the OS colour scheme, so `system` resolves to the dark theme.
    pub fn get(preference: ThemePreference) -> Result<Theme> {
        let name = match preference {
            ThemePreference::Light => "InspiredGitHub",
            ThemePreference::Dark | ThemePreference::System => "base16-ocean.dark",
        };

        let theme_set = ThemeSet::load_defaults();
        if let Some(theme) = theme_set.themes.get(name) {
            return Ok(theme.clone());
        }

        bail!(format!("Theme {name} does not exist in assets"));
    }
}
