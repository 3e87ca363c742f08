use crate::core::prompt::PromptBuilder;
use crate::core::{Catalog, CompletionClient, Query};
use crate::utils::error::{AdvisorError, Result};
use std::sync::Arc;

pub const DEFAULT_MAX_PROMPT_CHARS: usize = 400_000;

/// Answers one question per call against a catalog loaded once.
pub struct Advisor<C: CompletionClient> {
    catalog: Arc<Catalog>,
    builder: PromptBuilder,
    client: C,
    max_prompt_chars: usize,
}

impl<C: CompletionClient> Advisor<C> {
    pub fn new(catalog: Arc<Catalog>, builder: PromptBuilder, client: C) -> Self {
        Self {
            catalog,
            builder,
            client,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    pub fn with_max_prompt_chars(mut self, limit: usize) -> Self {
        self.max_prompt_chars = limit;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn builder(&self) -> &PromptBuilder {
        &self.builder
    }

    /// Returns the model's completion unmodified.
    pub async fn recommend(&self, query: &Query) -> Result<String> {
        let prompt = self.builder.build(&self.catalog, query);

        let size = prompt.char_len();
        if size > self.max_prompt_chars {
            tracing::warn!(
                "Prompt of {} characters exceeds limit of {}, not sending",
                size,
                self.max_prompt_chars
            );
            return Err(AdvisorError::PromptTooLarge {
                size,
                limit: self.max_prompt_chars,
            });
        }

        tracing::info!(
            "Requesting {} recommendations over {} cards ({} prompt characters)",
            self.builder.num_recommendations(),
            self.catalog.len(),
            size
        );

        let completion = self.client.complete(&prompt).await?;
        tracing::debug!("Received completion of {} characters", completion.len());
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardRecord, Prompt};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingClient {
        reply: String,
        prompts: Mutex<Vec<Prompt>>,
    }

    impl RecordingClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, prompt: &Prompt) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.clone());
            Ok(self.reply.clone())
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(vec![
            CardRecord::new("CardA", "2% groceries"),
            CardRecord::new("CardB", "3x travel"),
        ]))
    }

    #[tokio::test]
    async fn test_completion_passed_through_unmodified() {
        let reply = "  **CardA** is best.\n\n(2% groceries)  ";
        let advisor = Advisor::new(catalog(), PromptBuilder::default(), RecordingClient::new(reply));

        let query = Query::new("best for groceries").unwrap();
        let text = advisor.recommend(&query).await.unwrap();

        assert_eq!(text, reply);
        let prompts = advisor.client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let sent = prompts[0].text();
        assert!(sent.contains("CardA"));
        assert!(sent.contains("CardB"));
        assert!(sent.contains("best for groceries"));
    }

    #[tokio::test]
    async fn test_oversized_prompt_rejected_without_calling_model() {
        let advisor = Advisor::new(catalog(), PromptBuilder::default(), RecordingClient::new("x"))
            .with_max_prompt_chars(50);

        let query = Query::new("best for groceries").unwrap();
        let err = advisor.recommend(&query).await.unwrap_err();

        assert!(matches!(err, AdvisorError::PromptTooLarge { limit: 50, .. }));
        assert!(advisor.client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_client_error_propagates() {
        struct FailingClient;

        #[async_trait]
        impl CompletionClient for FailingClient {
            async fn complete(&self, _prompt: &Prompt) -> Result<String> {
                Err(AdvisorError::RequestError {
                    message: "connection reset".to_string(),
                })
            }
        }

        let advisor = Advisor::new(catalog(), PromptBuilder::default(), FailingClient);
        let query = Query::new("best for travel").unwrap();

        let err = advisor.recommend(&query).await.unwrap_err();

        assert!(matches!(err, AdvisorError::RequestError { .. }));
    }
}
