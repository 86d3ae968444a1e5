// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::OpenAIClient;

use super::BaseAI;

/// Upper bound for one assistant answer.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI implementation of AI capabilities
#[derive(Clone)]
pub struct OpenAIAssistant {
    client: OpenAIClient,
    model: String,
}

impl OpenAIAssistant {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = OpenAIClient::new(api_key)
            .with_timeout(COMPLETION_TIMEOUT)
            .context("Failed to build OpenAI client")?;
        Ok(Self { client, model })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for OpenAIAssistant {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.client
            .complete(&self.model, system, user)
            .await
            .map_err(|e| anyhow::anyhow!("OpenAI completion failed: {}", e))
    }
}
