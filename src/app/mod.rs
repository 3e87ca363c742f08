pub mod shell;

use crate::core::advisor::Advisor;
use crate::core::catalog::load_catalog;
use crate::core::client::{api_key_from_env, OpenAiClient};
use crate::core::prompt::PromptBuilder;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::sync::Arc;

/// Wires the credential, catalog and model client from configuration.
/// The credential is checked before anything else is loaded.
pub fn build_advisor(config: &dyn ConfigProvider) -> Result<Advisor<OpenAiClient>> {
    let api_key = api_key_from_env(config.api_key_env())?;
    let catalog = Arc::new(load_catalog(config.catalog_path())?);

    let format = config.response_format();
    let client = OpenAiClient::new(config.api_endpoint(), api_key)
        .with_model(config.model())
        .with_temperature(config.temperature())
        .with_format(format);
    let builder = PromptBuilder::new(config.num_recommendations(), format);

    Ok(Advisor::new(catalog, builder, client).with_max_prompt_chars(config.max_prompt_chars()))
}
