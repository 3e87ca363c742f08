use crate::core::{Catalog, Prompt, Query, ResponseFormat};

pub const DEFAULT_RECOMMENDATIONS: usize = 5;
pub const MAX_RECOMMENDATIONS: usize = 10;

const EMPTY_CATALOG_MARKER: &str = "(no cards in the catalog)";

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    num_recommendations: usize,
    format: ResponseFormat,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_RECOMMENDATIONS, ResponseFormat::Text)
    }
}

impl PromptBuilder {
    pub fn new(num_recommendations: usize, format: ResponseFormat) -> Self {
        Self {
            num_recommendations: num_recommendations.clamp(1, MAX_RECOMMENDATIONS),
            format,
        }
    }

    pub fn num_recommendations(&self) -> usize {
        self.num_recommendations
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    pub fn build(&self, catalog: &Catalog, query: &Query) -> Prompt {
        Prompt {
            system: self.instructions(catalog.len()),
            user: self.request(catalog, query),
        }
    }

    fn instructions(&self, card_count: usize) -> String {
        let n = self.num_recommendations;
        let mut text = format!(
            "You are an expert credit card advisor. You have access to a database of {card_count} credit cards.\n\n\
             Your task is to analyze the user's question and recommend the top {n} credit cards that best match their needs.\n\n\
             For each recommendation:\n\
             1. Provide the exact card name\n\
             2. Explain why it's a good match for the user's specific query\n\
             3. Highlight the most relevant perks\n\n\
             Only recommend cards from the database."
        );

        match self.format {
            ResponseFormat::Text => {
                text.push_str("\n\nAnswer in plain prose with a numbered list, one entry per card.");
            }
            ResponseFormat::Json => {
                text.push_str(
                    "\n\nFormat your response as a JSON object with this structure:\n\
                     {\n  \"recommendations\": [\n    {\n      \
                     \"card_name\": \"exact card name from database\",\n      \
                     \"why_recommended\": \"explanation of why this card matches the user's needs\",\n      \
                     \"key_perks\": \"most relevant perks for this user\"\n    }\n  ]\n}",
                );
            }
        }

        text.push_str("\n\nBe specific and focus on perks that directly address the user's question.");
        text
    }

    fn request(&self, catalog: &Catalog, query: &Query) -> String {
        let listing = if catalog.is_empty() {
            EMPTY_CATALOG_MARKER.to_string()
        } else {
            catalog
                .cards()
                .iter()
                .enumerate()
                .map(|(i, card)| {
                    format!("Card {}: {}\nPerks: {}", i + 1, card.name, card.perks_summary)
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        let closing = match self.format {
            ResponseFormat::Text => format!(
                "Please recommend the top {} credit cards for this user's needs.",
                self.num_recommendations
            ),
            ResponseFormat::Json => format!(
                "Please recommend the top {} credit cards for this user's needs. Return your response as a JSON object.",
                self.num_recommendations
            ),
        };

        format!(
            "User Question: {}\n\nAvailable Credit Cards:\n{}\n\n{}",
            query.as_str(),
            listing,
            closing
        )
    }
}
