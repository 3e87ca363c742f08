use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Catalog error: {message}")]
    DataError { message: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("Recommendation request failed: {message}")]
    RequestError { message: String },

    #[error("Prompt is {size} characters, exceeding the limit of {limit}")]
    PromptTooLarge { size: usize, limit: usize },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<csv::Error> for AdvisorError {
    fn from(err: csv::Error) -> Self {
        AdvisorError::DataError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        AdvisorError::RequestError {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Authentication,
    Network,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::DataError { .. } => ErrorCategory::Data,
            AdvisorError::AuthError { .. } => ErrorCategory::Authentication,
            AdvisorError::RequestError { .. } => ErrorCategory::Network,
            AdvisorError::PromptTooLarge { .. } | AdvisorError::InvalidQuery { .. } => {
                ErrorCategory::Input
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Critical errors end the session; anything below only abandons the current turn.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdvisorError::InvalidQuery { .. } => ErrorSeverity::Low,
            AdvisorError::RequestError { .. } | AdvisorError::PromptTooLarge { .. } => {
                ErrorSeverity::Medium
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            AdvisorError::DataError { .. }
            | AdvisorError::AuthError { .. }
            | AdvisorError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::DataError { message } => {
                format!("Could not load the credit card catalog: {}", message)
            }
            AdvisorError::AuthError { message } => {
                format!("The model API rejected our credentials: {}", message)
            }
            AdvisorError::RequestError { message } => {
                format!("I couldn't generate recommendations ({})", message)
            }
            AdvisorError::PromptTooLarge { size, limit } => format!(
                "The card catalog is too large to send in one request ({} of {} characters)",
                size, limit
            ),
            AdvisorError::InvalidQuery { message } => format!("Invalid question: {}", message),
            AdvisorError::IoError(e) => format!("A system error occurred: {}", e),
            AdvisorError::ConfigError { message } => format!("Configuration problem: {}", message),
            AdvisorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdvisorError::DataError { .. } => {
                "Check that the CSV exists and has 'card_name' and 'perks_summary' columns"
            }
            AdvisorError::AuthError { .. } => {
                "Set a valid API key in the environment (OPENAI_API_KEY by default)"
            }
            AdvisorError::RequestError { .. } => "Please try rephrasing your question",
            AdvisorError::PromptTooLarge { .. } => {
                "Use a smaller catalog or raise --max-prompt-chars if the model allows it"
            }
            AdvisorError::InvalidQuery { .. } => "Type a question about credit cards",
            AdvisorError::IoError(_) => "Check file permissions and available disk space",
            AdvisorError::ConfigError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => {
                "Review the command-line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
