pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{build_advisor, shell::ChatShell};
pub use config::toml_config::TomlConfig;
pub use core::{advisor::Advisor, catalog::load_catalog, client::OpenAiClient};
pub use utils::error::{AdvisorError, Result};
