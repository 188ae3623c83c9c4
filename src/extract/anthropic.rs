use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::{Value, json};

use super::Extractor;
use super::parse::parse_model_json;
use super::prompt::extraction_prompt;
use crate::core::AppConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct MessageResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Sends the syllabus to the Anthropic Messages API and parses the JSON
/// the model writes back.
#[derive(Clone, Debug)]
pub struct AnthropicExtractor {
    api_hostname: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl AnthropicExtractor {
    pub fn new(api_hostname: &str, api_key: Option<&str>, model: &str, max_tokens: u32) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.map(String::from),
            model: model.to_string(),
            max_tokens,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.anthropic_api_hostname,
            config.anthropic_api_key.as_deref(),
            &config.anthropic_model,
            config.max_tokens,
        )
    }
}

/// A `document` content block for the upload. PDFs go up as-is and
/// anything else has to be readable as UTF-8 text.
fn document_block(bytes: &[u8]) -> Result<Value> {
    if bytes.starts_with(b"%PDF") {
        return Ok(json!({
            "type": "document",
            "source": {
                "type": "base64",
                "media_type": "application/pdf",
                "data": STANDARD.encode(bytes),
            },
        }));
    }
    let text = std::str::from_utf8(bytes)
        .map_err(|_| anyhow!("Document is neither a PDF nor UTF-8 text"))?;
    Ok(json!({
        "type": "document",
        "source": {
            "type": "text",
            "media_type": "text/plain",
            "data": text,
        },
    }))
}

#[async_trait]
impl Extractor for AnthropicExtractor {
    async fn extract(&self, document: &[u8]) -> Result<Value> {
        let Some(api_key) = &self.api_key else {
            bail!("Missing ANTHROPIC_API_KEY");
        };

        let payload = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    document_block(document)?,
                    {"type": "text", "text": extraction_prompt()?},
                ],
            }],
        });
        let url = format!("{}/v1/messages", self.api_hostname.trim_end_matches('/'));
        tracing::debug!("Requesting extraction from {} with {}", url, self.model);

        let response = reqwest::Client::new()
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(60 * 10))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Extraction request failed with {}: {}", status, body);
        }

        let message: MessageResponse = response.json().await?;
        let text = message
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            bail!("model returned no text content");
        }

        parse_model_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> String {
        json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-6",
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn"
        })
        .to_string()
    }

    #[tokio::test]
    async fn it_extracts_json_from_the_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "claude-sonnet-4-6",
                "max_tokens": 4096
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(message("```json\n{\"course_name\": \"ARC\", \"events\": []}\n```"))
            .create();

        let extractor = AnthropicExtractor::new(
            &server.url(),
            Some("test-key"),
            "claude-sonnet-4-6",
            4096,
        );
        let value = extractor.extract(b"%PDF-1.7 fake").await.unwrap();

        mock.assert();
        assert_eq!(value["course_name"], "ARC");
    }

    #[tokio::test]
    async fn it_requires_an_api_key() {
        let extractor =
            AnthropicExtractor::new("http://localhost:1", None, "claude-sonnet-4-6", 4096);
        let err = extractor.extract(b"%PDF").await.unwrap_err();
        assert_eq!(err.to_string(), "Missing ANTHROPIC_API_KEY");
    }

    #[tokio::test]
    async fn it_reports_replies_without_text() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]}"#;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let extractor = AnthropicExtractor::new(&server.url(), Some("k"), "m", 100);
        let err = extractor.extract(b"Syllabus text").await.unwrap_err();
        assert_eq!(err.to_string(), "model returned no text content");
    }

    #[tokio::test]
    async fn it_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body(r#"{"type":"error","error":{"type":"authentication_error"}}"#)
            .create();

        let extractor = AnthropicExtractor::new(&server.url(), Some("bad"), "m", 100);
        let err = extractor.extract(b"Syllabus text").await.unwrap_err();
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("authentication_error"));
    }

    #[test]
    fn it_sends_text_documents_as_plain_text() {
        let block = document_block(b"Week 1: Intro").unwrap();
        assert_eq!(block["source"]["type"], "text");
        assert_eq!(block["source"]["data"], "Week 1: Intro");

        let block = document_block(b"%PDF-1.4").unwrap();
        assert_eq!(block["source"]["media_type"], "application/pdf");
        assert_eq!(block["source"]["data"], STANDARD.encode(b"%PDF-1.4"));

        assert!(document_block(&[0xff, 0xfe, 0x00]).is_err());
    }
}
