use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use super::{ReportGenerator, ReportInput};
use crate::llm::{ChatMessage, SharedLlm};

/// Sends the check-in to a chat-completion model and returns its text verbatim.
pub struct LlmReportGenerator {
    llm: SharedLlm,
    model: String,
    system_prompt: String,
}

impl LlmReportGenerator {
    pub fn new(llm: SharedLlm, model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            system_prompt: system_prompt.into(),
        }
    }

    fn build_messages(&self, input: &ReportInput<'_>) -> Vec<ChatMessage> {
        let habits: serde_json::Map<_, _> = input
            .habits
            .iter()
            .map(|(habit, done)| (habit.label().to_string(), json!(done)))
            .collect();
        let check_in = json!({
            "habits": habits,
            "mood": input.mood.get(),
            "coach_style": input.style.title(),
        });

        vec![
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(check_in.to_string()),
        ]
    }
}

#[async_trait]
impl ReportGenerator for LlmReportGenerator {
    async fn generate(&self, input: &ReportInput<'_>) -> Result<String> {
        let messages = self.build_messages(input);
        tracing::info!(model = %self.model, "Requesting condition report from chat model");
        self.llm.complete_chat(&self.model, messages).await
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
