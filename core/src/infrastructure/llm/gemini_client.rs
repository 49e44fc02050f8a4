use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{common::entities::app_errors::CoreError, label_analysis::ports::LLMClient};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: Option<String>,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(
        api_key: Option<String>,
        model_name: String,
        base_url: String,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        )
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("Gemini API key is not configured");
            CoreError::ExternalServiceError("GEMINI_API_KEY is not configured".to_string())
        })?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        extract_text(gemini_response)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

/// Concatenated text parts of the first candidate, if any.
fn extract_text(response: GeminiResponse) -> Option<String> {
    let text = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<String>();

    if text.trim().is_empty() { None } else { Some(text) }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
    ) -> Result<String, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: base64_image,
                        },
                    },
                ],
            }],
        };

        self.call_gemini_api(request).await
    }

    async fn generate_with_text(&self, prompt: String) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text { text: prompt }],
            }],
        };

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> GeminiLLMClient {
        GeminiLLMClient::new(
            api_key.map(str::to_string),
            "gemini-2.0-flash".to_string(),
            "http://127.0.0.1:9/".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        assert_eq!(
            client(Some("k")).endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert!(!client(Some("  ")).is_configured());
        assert!(!client(None).is_configured());
        assert!(client(Some("abc")).is_configured());
    }

    #[tokio::test]
    async fn missing_api_key_fails_at_call_time() {
        let err = client(None)
            .generate_with_text("hi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(msg) if msg.contains("GEMINI_API_KEY")));
    }

    #[test]
    fn image_request_serializes_inline_data() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: "read".to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".to_string(),
                            data: "AAAA".to_string(),
                        },
                    },
                ],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "read");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
    }

    #[test]
    fn response_text_parts_are_joined() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Water, "},{"text":"Sugar"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("Water, Sugar"));
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(response), None);

        let blocked: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(extract_text(blocked), None);
    }
}
