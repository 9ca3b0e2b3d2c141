use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>().unwrap();

    assert_eq!(
        doc.get("model").unwrap().as_str().unwrap(),
        "deepseek/deepseek-r1:free"
    );
    assert_eq!(
        doc.get("open-router-url").unwrap().as_str().unwrap(),
        "https://openrouter.ai"
    );
    assert_eq!(doc.get("theme").unwrap().as_str().unwrap(), "system");
    assert!(doc.get("session-id").is_none());
    assert!(doc.get("config-file").is_none());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["chai", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Model), "deepseek/deepseek-r1:free");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["chai", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());

    return Ok(());
}
