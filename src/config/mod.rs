pub mod toml_config;

use crate::core::advisor::DEFAULT_MAX_PROMPT_CHARS;
use crate::core::client::{DEFAULT_API_ENDPOINT, DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
use crate::core::prompt::MAX_RECOMMENDATIONS;
use crate::core::{ConfigProvider, ResponseFormat};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url,
};

pub const DEFAULT_CATALOG_PATH: &str = "credit_cards.csv";

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "card-advisor")]
#[command(about = "Ask natural-language questions about credit cards and get AI recommendations")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CATALOG_PATH, help = "CSV with card_name and perks_summary columns")]
    pub catalog: String,

    #[arg(long, help = "TOML configuration file; replaces the model and catalog flags")]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_API_KEY_ENV, help = "Environment variable holding the API key")]
    pub api_key_env: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = "0.3")]
    pub temperature: f32,

    #[arg(long, default_value = "5", help = "Number of recommendations (1-10)")]
    pub recommendations: usize,

    #[arg(long, help = "Request structured JSON recommendations")]
    pub json: bool,

    #[arg(long, default_value_t = DEFAULT_MAX_PROMPT_CHARS)]
    pub max_prompt_chars: usize,

    #[arg(long, help = "Ask a single question and exit")]
    pub query: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn num_recommendations(&self) -> usize {
        self.recommendations
    }

    fn response_format(&self) -> ResponseFormat {
        if self.json {
            ResponseFormat::Json
        } else {
            ResponseFormat::Text
        }
    }

    fn max_prompt_chars(&self) -> usize {
        self.max_prompt_chars
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)?;
        tracing::debug!("CLI configuration validation passed");
        Ok(())
    }
}

/// Checks shared by every configuration source.
pub fn validate_settings(config: &dyn ConfigProvider) -> Result<()> {
    validate_path("catalog_path", config.catalog_path())?;
    validate_url("api_endpoint", config.api_endpoint())?;
    validate_non_empty_string("api_key_env", config.api_key_env())?;
    validate_non_empty_string("model", config.model())?;
    validate_range("temperature", config.temperature(), 0.0, 2.0)?;
    validate_range(
        "num_recommendations",
        config.num_recommendations(),
        1,
        MAX_RECOMMENDATIONS,
    )?;
    validate_range("max_prompt_chars", config.max_prompt_chars(), 1, usize::MAX)?;
    Ok(())
}
