use super::Themes;
use crate::domain::models::ThemePreference;

#[test]
fn it_loads_a_theme_for_every_preference() {
    assert!(Themes::get(ThemePreference::Light).is_ok());
    assert!(Themes::get(ThemePreference::Dark).is_ok());
    assert!(Themes::get(ThemePreference::System).is_ok());
}
