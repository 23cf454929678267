use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::entities::Upload;
use crate::error::{malformed_payload_error, Error};

#[derive(Clone, Debug)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 of the raw bytes.
    pub data: String,
}

impl From<&Upload> for InlineImage {
    fn from(upload: &Upload) -> Self {
        Self {
            mime_type: upload.content_type.clone(),
            data: upload.base64(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Prompt {
    pub text: String,
    pub images: Vec<InlineImage>,
    /// Ask the model for a JSON-only answer.
    pub json: bool,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn json(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            json: true,
            ..Self::default()
        }
    }

    pub fn with_images<'a>(mut self, uploads: impl IntoIterator<Item = &'a Upload>) -> Self {
        self.images.extend(uploads.into_iter().map(InlineImage::from));
        self
    }
}

#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, prompt: Prompt) -> Result<String, Error>;
}

pub type DynGenerator = dyn TextGenerator + Send + Sync;

/// Runs a JSON-only prompt and returns the object the model produced.
pub async fn generate_object(
    generator: &DynGenerator,
    prompt: Prompt,
) -> Result<Map<String, Value>, Error> {
    let text = generator.generate(Prompt { json: true, ..prompt }).await?;
    parse_object(&text)
}

fn parse_object(text: &str) -> Result<Map<String, Value>, Error> {
    // Some models still wrap JSON output in a markdown fence.
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    match serde_json::from_str(body.trim()) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(malformed_payload_error(
            "model returned JSON that is not an object",
        )),
        Err(err) => Err(malformed_payload_error(format!(
            "model returned invalid JSON: {}",
            err
        ))),
    }
}
