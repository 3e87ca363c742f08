use anyhow::Result;
use card_advisor::app::shell::FAILURE_MESSAGE;
use card_advisor::core::{ConfigProvider, Query, ResponseFormat, Role};
use card_advisor::{build_advisor, load_catalog, AdvisorError, ChatShell, TomlConfig};
use httpmock::prelude::*;
use serde_json::json;
use std::io::Cursor;
use tempfile::TempDir;

const CATALOG_CSV: &str = "card_name,perks_summary\nCardA,2% groceries\nCardB,3x travel\n";

fn write_catalog(dir: &TempDir) -> Result<String> {
    let path = dir.path().join("credit_cards.csv");
    std::fs::write(&path, CATALOG_CSV)?;
    Ok(path.to_str().unwrap().replace('\\', "/"))
}

fn write_config(dir: &TempDir, catalog: &str, endpoint: &str, key_env: &str) -> Result<TomlConfig> {
    let content = format!(
        r#"
[catalog]
path = "{catalog}"

[model]
endpoint = "{endpoint}"
api_key_env = "{key_env}"
"#
    );
    let path = dir.path().join("advisor.toml");
    std::fs::write(&path, content)?;
    Ok(TomlConfig::from_file(&path)?)
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn test_end_to_end_groceries_question() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog_path = write_catalog(&temp_dir)?;

    let reply = "1. **CardA** earns 2% on groceries.\n2. CardB is for travel.";
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer e2e-secret")
                .body_contains("CardA")
                .body_contains("CardB")
                .body_contains("best for groceries");
            then.status(200).json_body(completion(reply));
        })
        .await;

    std::env::set_var("CARD_ADVISOR_E2E_KEY", "e2e-secret");
    let config = write_config(&temp_dir, &catalog_path, &server.base_url(), "CARD_ADVISOR_E2E_KEY")?;
    let advisor = build_advisor(&config)?;
    assert_eq!(advisor.catalog().len(), 2);

    let mut shell = ChatShell::new(advisor, Cursor::new(b"best for groceries\n".to_vec()), Vec::new());
    shell.run().await?;

    api_mock.assert_async().await;
    let history = shell.history().to_vec();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].content, reply);

    let out = String::from_utf8(shell.into_output())?;
    assert!(out.contains(reply));
    Ok(())
}

#[tokio::test]
async fn test_api_failure_shown_to_user() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog_path = write_catalog(&temp_dir)?;

    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("service unavailable");
        })
        .await;

    std::env::set_var("CARD_ADVISOR_FAIL_KEY", "fail-secret");
    let config = write_config(&temp_dir, &catalog_path, &server.base_url(), "CARD_ADVISOR_FAIL_KEY")?;
    let advisor = build_advisor(&config)?;

    let query = Query::new("best for travel")?;
    let err = advisor.recommend(&query).await.unwrap_err();
    assert!(matches!(err, AdvisorError::RequestError { .. }));

    let mut shell = ChatShell::new(advisor, Cursor::new(b"best for travel\n".to_vec()), Vec::new());
    shell.run().await?;

    api_mock.assert_hits_async(2).await;
    let out = String::from_utf8(shell.into_output())?;
    assert!(out.contains(FAILURE_MESSAGE));
    Ok(())
}

#[tokio::test]
async fn test_structured_recommendations_rendered() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog_path = write_catalog(&temp_dir)?;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("json_object");
            then.status(200).json_body(completion(
                r#"{"recommendations": [{"card_name": "CardB", "why_recommended": "Frequent flyer", "key_perks": "3x travel"}]}"#,
            ));
        })
        .await;

    std::env::set_var("CARD_ADVISOR_JSON_KEY", "json-secret");
    let mut config =
        write_config(&temp_dir, &catalog_path, &server.base_url(), "CARD_ADVISOR_JSON_KEY")?;
    config.recommendations.format = ResponseFormat::Json;
    config.recommendations.count = 3;
    assert_eq!(config.response_format(), ResponseFormat::Json);

    let advisor = build_advisor(&config)?;
    let mut shell = ChatShell::new(advisor, Cursor::new(b"best for travel\n".to_vec()), Vec::new());
    shell.run().await?;

    let out = String::from_utf8(shell.into_output())?;
    assert!(out.contains("1. CardB"));
    assert!(out.contains("Key Perks: 3x travel"));
    Ok(())
}

#[tokio::test]
async fn test_missing_api_key_fails_fast() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog_path = write_catalog(&temp_dir)?;

    let config = write_config(
        &temp_dir,
        &catalog_path,
        "http://127.0.0.1:1",
        "CARD_ADVISOR_NEVER_SET_KEY",
    )?;

    let err = build_advisor(&config).err().unwrap();
    assert!(matches!(err, AdvisorError::AuthError { .. }));
    Ok(())
}

#[test]
fn test_missing_catalog_is_data_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.csv");

    let err = load_catalog(&missing).unwrap_err();

    assert!(matches!(err, AdvisorError::DataError { .. }));
    assert!(err.is_fatal());
    Ok(())
}

#[test]
fn test_catalog_row_count_and_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("cards.csv");
    let mut csv = String::from("card_name,perks_summary,annual_fee\n");
    for i in 0..350 {
        csv.push_str(&format!("Card {i},Perk {i},0\n"));
    }
    std::fs::write(&path, csv)?;

    let catalog = load_catalog(&path)?;

    assert_eq!(catalog.len(), 350);
    for (i, card) in catalog.cards().iter().enumerate() {
        assert_eq!(card.name, format!("Card {i}"));
    }
    Ok(())
}
