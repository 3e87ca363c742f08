use crate::config::{validate_settings, DEFAULT_CATALOG_PATH};
use crate::core::advisor::DEFAULT_MAX_PROMPT_CHARS;
use crate::core::client::{
    DEFAULT_API_ENDPOINT, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::core::prompt::DEFAULT_RECOMMENDATIONS;
use crate::core::{ConfigProvider, ResponseFormat};
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub recommendations: RecommendationSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSection {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub format: ResponseFormat,
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

fn default_catalog_path() -> String {
    DEFAULT_CATALOG_PATH.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_count() -> usize {
    DEFAULT_RECOMMENDATIONS
}

fn default_max_prompt_chars() -> usize {
    DEFAULT_MAX_PROMPT_CHARS
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            name: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for RecommendationSection {
    fn default() -> Self {
        Self {
            count: default_count(),
            format: ResponseFormat::default(),
            max_prompt_chars: default_max_prompt_chars(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AdvisorError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| AdvisorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換 ${VAR} 環境變數，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdvisorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    fn api_endpoint(&self) -> &str {
        &self.model.endpoint
    }

    fn api_key_env(&self) -> &str {
        &self.model.api_key_env
    }

    fn model(&self) -> &str {
        &self.model.name
    }

    fn temperature(&self) -> f32 {
        self.model.temperature
    }

    fn num_recommendations(&self) -> usize {
        self.recommendations.count
    }

    fn response_format(&self) -> ResponseFormat {
        self.recommendations.format
    }

    fn max_prompt_chars(&self) -> usize {
        self.recommendations.max_prompt_chars
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)?;
        tracing::debug!("TOML configuration validation passed");
        Ok(())
    }
}
