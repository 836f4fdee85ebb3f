use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::PlanError;
use crate::models::{Citation, GenerateContentResponse, GroundingMetadata};
use crate::provider::{Grounded, GroundedGenerator};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for the generateContent API with Google Search grounding and a
/// fixed response schema. The credential is injected at construction; a
/// missing key fails individual requests, never the process.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "googleSearch": {} }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": plan_response_schema(),
            }
        })
    }
}

#[async_trait]
impl GroundedGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Grounded, PlanError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PlanError::Configuration("GEMINI_API_KEY is not set".to_string()))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Calling generateContent at {url}");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| PlanError::Provider(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlanError::Provider(format!(
                "generateContent returned {status}: {body}"
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PlanError::Provider(format!("failed to parse response envelope: {e}")))?;

        let candidate = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| PlanError::Provider("response contained no candidates".to_string()))?;

        let text = candidate
            .content
            .as_ref()
            .and_then(|content| content.parts.iter().find_map(|part| part.text.as_deref()))
            .ok_or_else(|| PlanError::Provider("candidate contained no text part".to_string()))?;

        let payload: Value = serde_json::from_str(text)
            .map_err(|e| PlanError::Provider(format!("candidate text is not valid JSON: {e}")))?;

        let citations = extract_citations(candidate.grounding_metadata.as_ref());
        debug!("Extracted {} grounding citations", citations.len());

        Ok(Grounded { payload, citations })
    }
}

/// Pulls (title, uri) pairs out of the grounding metadata. Non-web chunks
/// and web chunks without a source URI are skipped; absent metadata yields
/// an empty list, never a null.
fn extract_citations(metadata: Option<&GroundingMetadata>) -> Vec<Citation> {
    metadata
        .map(|m| {
            m.grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .filter_map(|web| {
                    web.uri.as_ref().map(|uri| Citation {
                        title: web.title.clone().unwrap_or_default(),
                        uri: uri.clone(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Response schema sent with every request. Required fields are declared at
/// every level so the provider cannot omit parts of the plan.
fn plan_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "weather": {
                "type": "OBJECT",
                "properties": {
                    "temp": { "type": "NUMBER" },
                    "condition": { "type": "STRING" },
                    "isOutdoorFriendly": { "type": "BOOLEAN" }
                },
                "required": ["temp", "condition", "isOutdoorFriendly"]
            },
            "hotels": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "pricePerNight": { "type": "NUMBER" },
                        "rating": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "address": { "type": "STRING" },
                        "amenities": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "bookingLink": { "type": "STRING" }
                    },
                    "required": ["name", "pricePerNight", "rating", "description", "address", "amenities"]
                }
            },
            "activities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "cost": { "type": "NUMBER" },
                        "type": { "type": "STRING", "enum": ["Indoor", "Outdoor"] },
                        "description": { "type": "STRING" }
                    },
                    "required": ["name", "cost", "type", "description"]
                }
            },
            "foodSuggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "totalEstimatedCost": { "type": "NUMBER" }
        },
        "required": ["weather", "hotels", "activities", "foodSuggestions", "totalEstimatedCost"]
    })
}
