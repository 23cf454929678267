use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{configuration_error, malformed_payload_error, Error};
use crate::generation::{Prompt, TextGenerator};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TIMEOUT: Duration = Duration::from_secs(90);

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct Gemini {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl Gemini {
    pub fn new(api_key: Option<String>, model: String) -> Result<Self, Error> {
        Ok(Self {
            client: super::http_client(TIMEOUT)?,
            api_base: API_BASE.into(),
            api_key,
            model,
        })
    }

    fn api_key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .ok_or_else(|| configuration_error("GEMINI_API_KEY"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

impl<'a> From<&'a Prompt> for Request<'a> {
    fn from(prompt: &'a Prompt) -> Self {
        let mut parts = Vec::with_capacity(prompt.images.len() + 1);
        parts.push(Part::Text { text: &prompt.text });
        parts.extend(prompt.images.iter().map(|image| Part::InlineData {
            inline_data: InlineData {
                mime_type: &image.mime_type,
                data: &image.data,
            },
        }));

        Self {
            contents: [Content { parts }],
            generation_config: prompt.json.then(|| GenerationConfig {
                response_mime_type: "application/json",
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn extract_text(body: &str) -> Result<String, Error> {
    let data: Response = serde_json::from_str(body)?;

    let text: String = data
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(malformed_payload_error("gemini response has no candidate text"));
    }

    Ok(text)
}

#[async_trait]
impl TextGenerator for Gemini {
    #[tracing::instrument(skip_all, fields(images = prompt.images.len(), json = prompt.json))]
    async fn generate(&self, prompt: Prompt) -> Result<String, Error> {
        let url = format!("{}/{}:generateContent", self.api_base, self.model);
        let key = self.api_key()?;

        let res = self
            .client
            .post(url)
            .header(API_KEY_HEADER, key)
            .json(&Request::from(&prompt))
            .send()
            .await?;

        let body = super::read_success("gemini", res).await?;

        extract_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::tests::response_body;
    use crate::error::{MALFORMED_PAYLOAD, TRANSPORT};
    use crate::generation::InlineImage;
    use serde_json::json;

    #[test]
    fn text_prompt_request() {
        let prompt = Prompt::text("Qual a pressão ideal dos pneus?");

        assert_eq!(
            serde_json::to_value(Request::from(&prompt)).unwrap(),
            json!({ "contents": [ { "parts": [ { "text": "Qual a pressão ideal dos pneus?" } ] } ] })
        );
    }

    #[test]
    fn json_prompt_with_images() {
        let mut prompt = Prompt::json("analise");
        prompt.images.push(InlineImage {
            mime_type: "image/jpeg".into(),
            data: "aGVsbG8=".into(),
        });

        assert_eq!(
            serde_json::to_value(Request::from(&prompt)).unwrap(),
            json!({
                "contents": [ { "parts": [
                    { "text": "analise" },
                    { "inline_data": { "mime_type": "image/jpeg", "data": "aGVsbG8=" } }
                ] } ],
                "generationConfig": { "responseMimeType": "application/json" }
            })
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Calibre " }, { "text": "com 32 psi." } ], "role": "model" },
                  "finishReason": "STOP" },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ],
            "usageMetadata": { "totalTokenCount": 42 }
        }"#;

        assert_eq!(extract_text(body).unwrap(), "Calibre com 32 psi.");
    }

    #[tokio::test]
    async fn transport_failure_keeps_the_key_private() {
        let mut gemini =
            Gemini::new(Some("SECRET-KEY-123".into()), "gemini-1.5-flash".into()).unwrap();
        gemini.api_base = "http://127.0.0.1:9/v1".into();

        let err = gemini.generate(Prompt::text("oi")).await.unwrap_err();

        assert_eq!(err.code, TRANSPORT);
        let body = response_body(err).await;
        assert!(!body.to_string().contains("SECRET-KEY-123"));
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let blocked = r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#;
        assert_eq!(extract_text(blocked).unwrap_err().code, MALFORMED_PAYLOAD);

        let empty = r#"{ "candidates": [ { "finishReason": "SAFETY" } ] }"#;
        assert_eq!(extract_text(empty).unwrap_err().code, MALFORMED_PAYLOAD);
    }
}
