pub mod advisor;
pub mod catalog;
pub mod client;
pub mod prompt;
pub mod render;

pub use crate::domain::model::{
    CardRecord, Catalog, ChatMessage, Prompt, Query, Recommendation, ResponseFormat, Role,
};
pub use crate::domain::ports::{CompletionClient, ConfigProvider};
pub use crate::utils::error::Result;
