use crate::utils::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "card_name")]
    pub name: String,
    pub perks_summary: String,
}

impl CardRecord {
    pub fn new(name: impl Into<String>, perks_summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            perks_summary: perks_summary.into(),
        }
    }
}

/// Cards in file order. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<CardRecord>,
}

impl Catalog {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A user question. Kept verbatim; only blank text is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AdvisorError::InvalidQuery {
                message: "question cannot be empty".to_string(),
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

/// The two chat messages sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Both messages as a single text block.
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }

    pub fn char_len(&self) -> usize {
        self.system.chars().count() + self.user.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default = "unknown_card")]
    pub card_name: String,
    #[serde(default = "no_explanation")]
    pub why_recommended: String,
    #[serde(default = "no_perks")]
    pub key_perks: String,
}

fn unknown_card() -> String {
    "Unknown Card".to_string()
}

fn no_explanation() -> String {
    "No explanation provided".to_string()
}

fn no_perks() -> String {
    "No perks listed".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}
