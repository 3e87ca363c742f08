use card_advisor::config::validate_settings;
use card_advisor::core::{ConfigProvider, Query};
use card_advisor::utils::error::ErrorSeverity;
use card_advisor::utils::logger;
use card_advisor::{build_advisor, AdvisorError, ChatShell, CliConfig, TomlConfig};
use clap::Parser;
use std::io;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting card-advisor");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ card-advisor failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), AdvisorError> {
    let file_config;
    let config: &dyn ConfigProvider = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            file_config = TomlConfig::from_file(path)?;
            &file_config
        }
        None => cli,
    };

    // 驗證配置
    validate_settings(config)?;

    let advisor = build_advisor(config)?;

    let stdin = io::stdin();
    let mut shell = ChatShell::new(advisor, stdin.lock(), io::stdout());

    match &cli.query {
        Some(text) => {
            let query = Query::new(text.as_str())?;
            shell.ask(query).await
        }
        None => shell.run().await,
    }
}
