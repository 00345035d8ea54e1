use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use fact_extraction::ai::OpenAI;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
        })
    }

    /// Build the OpenAI client. Only the commands that call a model need it.
    pub fn openai(&self) -> Result<OpenAI> {
        let api_key = self
            .openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY must be set")?;

        let mut client = OpenAI::new(api_key).with_model(&self.openai_model);
        if let Some(base_url) = &self.openai_base_url {
            client = client.with_base_url(base_url);
        }
        Ok(client)
    }
}
