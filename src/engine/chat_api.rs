use super::{helpers::require_text, prompts, Engine};

use async_trait::async_trait;

use crate::{api::ChatAPI, error::Error, generation::Prompt};

#[async_trait]
impl ChatAPI for Engine {
    #[tracing::instrument(skip(self, question))]
    async fn ask(&self, question: String) -> Result<String, Error> {
        require_text("question", &question)?;

        let answer = self
            .generator
            .generate(Prompt::text(prompts::chat(&question)))
            .await?;

        Ok(answer.trim().to_string())
    }
}
