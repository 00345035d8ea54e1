//! `Drafter` for the OpenAI-compatible client.

use async_trait::async_trait;
use fact_extraction::ai::OpenAI;

use crate::drafter::{DraftRequest, Drafter};
use crate::error::{DraftError, DraftResult};

const SYSTEM_PROMPT: &str = "あなたは法人向け営業レターの執筆者です。\
与えられた依頼と事実だけを根拠に、宛名と署名を含む本文のみを日本語で出力してください。\
事実にない数値や出来事は書かないでください。";

#[async_trait]
impl Drafter for OpenAI {
    async fn draft(&self, request: &DraftRequest) -> DraftResult<String> {
        self.chat(SYSTEM_PROMPT, &request.prompt, request.temperature, false)
            .await
            .map_err(|e| DraftError::Drafter(Box::new(e)))
    }
}
