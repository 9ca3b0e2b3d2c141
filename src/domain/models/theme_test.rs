use super::ThemePreference;

#[test]
fn it_cycles_through_preferences_in_order() {
    let mut theme = ThemePreference::Light;
    theme = theme.cycle();
    assert_eq!(theme, ThemePreference::Dark);
    theme = theme.cycle();
    assert_eq!(theme, ThemePreference::System);
    theme = theme.cycle();
    assert_eq!(theme, ThemePreference::Light);
}

#[test]
fn it_defaults_to_system() {
    assert_eq!(ThemePreference::default(), ThemePreference::System);
}

#[test]
fn it_parses_config_values() {
    assert_eq!(ThemePreference::parse("light"), ThemePreference::Light);
    assert_eq!(ThemePreference::parse("dark"), ThemePreference::Dark);
    assert_eq!(ThemePreference::parse("system"), ThemePreference::System);
    assert_eq!(ThemePreference::parse("bogus"), ThemePreference::System);
}
