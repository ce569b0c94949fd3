use async_trait::async_trait;

use crate::context::Context;
use crate::error::SummarizeError;
use crate::openai::ChatClient;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize one entry. `text` is the already-normalized summary.
    /// The OpenAI prompt uses only `title` and `text`.
    async fn summarize(&self, title: &str, text: &str, link: &str)
        -> Result<String, SummarizeError>;
}

/// The instruction sent for every entry.
pub fn build_prompt(title: &str, text: &str) -> String {
    format!(
        "You are summarizing scientific or technical articles for a groundwater modeller.\n\
         \n\
         Title: {title}\n\
         \n\
         Abstract or content:\n\
         {text}\n\
         \n\
         Generate:\n\
         - Three concise bullet points with key takeaways\n\
         - One sentence on \"Why this matters\" to hydrogeology, groundwater modelling, or uncertainty analysis.\n"
    )
}

pub struct OpenAiSummarizer {
    chat: ChatClient,
    model: String,
    temperature: f32,
}

impl OpenAiSummarizer {
    pub fn new(ctx: &Context) -> Self {
        let llm = &ctx.config().llm;
        Self {
            chat: ChatClient::new(ctx),
            model: llm.model.clone(),
            temperature: llm.temperature,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        title: &str,
        text: &str,
        _link: &str,
    ) -> Result<String, SummarizeError> {
        let prompt = build_prompt(title, text);
        let response = self
            .chat
            .complete(&self.model, &prompt, self.temperature)
            .await?;
        Ok(response.trim().to_string())
    }
}
