use crate::core::advisor::Advisor;
use crate::core::render::render_completion;
use crate::core::{ChatMessage, CompletionClient, Query, Role};
use crate::utils::error::{AdvisorError, Result};
use std::io::{BufRead, Write};

pub const FAILURE_MESSAGE: &str =
    "I couldn't generate recommendations. Please try rephrasing your question.";

const EXAMPLE_QUESTIONS: [&str; 4] = [
    "What's the best card for travel rewards?",
    "I spend a lot on groceries, which card should I get?",
    "Best card for cash back on gas?",
    "Which card has the best sign-up bonus?",
];

/// Terminal chat loop: one question per line, answers written back to `output`.
pub struct ChatShell<C: CompletionClient, R: BufRead, W: Write> {
    advisor: Advisor<C>,
    input: R,
    output: W,
    history: Vec<ChatMessage>,
}

impl<C: CompletionClient, R: BufRead, W: Write> ChatShell<C, R, W> {
    pub fn new(advisor: Advisor<C>, input: R, output: W) -> Self {
        Self {
            advisor,
            input,
            output,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn print_banner(&mut self) -> Result<()> {
        writeln!(self.output, "Credit Card Recommendation Assistant")?;
        writeln!(
            self.output,
            "Ask me anything about credit cards and I'll recommend the best options for you!"
        )?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Total Cards in Database: {}",
            self.advisor.catalog().len()
        )?;
        writeln!(self.output, "Example Questions:")?;
        for question in EXAMPLE_QUESTIONS {
            writeln!(self.output, "  - {}", question)?;
        }
        writeln!(self.output, "(end input with Ctrl-D to leave)")?;
        Ok(())
    }

    /// Runs until end of input. A fatal error ends the session and is returned.
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner()?;

        loop {
            write!(self.output, "\n> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let text = line.trim_end_matches(['\r', '\n']);
            let query = match Query::new(text) {
                Ok(q) => q,
                Err(_) => continue,
            };

            self.ask(query).await?;
        }

        tracing::debug!("Chat session ended after {} messages", self.history.len());
        Ok(())
    }

    /// Handles one turn. Non-fatal failures are shown and swallowed; fatal ones are
    /// returned unprinted for the caller to report.
    pub async fn ask(&mut self, query: Query) -> Result<()> {
        self.history.push(ChatMessage {
            role: Role::User,
            content: query.as_str().to_string(),
        });

        writeln!(self.output, "Analyzing credit cards...")?;

        match self.advisor.recommend(&query).await {
            Ok(completion) => {
                let builder = self.advisor.builder();
                let shown =
                    render_completion(&completion, builder.format(), builder.num_recommendations());
                writeln!(self.output, "\n{}", shown)?;
                self.history.push(ChatMessage {
                    role: Role::Assistant,
                    content: shown,
                });
                Ok(())
            }
            Err(e) => {
                if e.is_fatal() {
                    return Err(e);
                }
                tracing::error!("Recommendation failed: {} (Category: {:?})", e, e.category());
                self.report_failure(&e)?;
                Ok(())
            }
        }
    }

    fn report_failure(&mut self, err: &AdvisorError) -> Result<()> {
        let message = match err {
            AdvisorError::RequestError { .. } => FAILURE_MESSAGE.to_string(),
            other => other.user_friendly_message(),
        };

        writeln!(self.output, "\nError: {}", message)?;
        writeln!(self.output, "Suggestion: {}", err.recovery_suggestion())?;
        self.history.push(ChatMessage {
            role: Role::Assistant,
            content: message,
        });
        Ok(())
    }
}
