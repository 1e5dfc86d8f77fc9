use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const GENERATE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    temperature: f32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug)]
pub enum GeminiError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ApiError { status: u16, message: String },
    EmptyResponse,
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            GeminiError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GeminiError::ApiError { status, message } => {
                write!(f, "Model API error {}: {}", status, message)
            }
            GeminiError::EmptyResponse => write!(f, "Model returned no text candidates"),
        }
    }
}

impl Error for GeminiError {}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::HttpError(err)
    }
}

/// Stateless handle on the Gemini `generateContent` endpoint. Each call is a
/// single-turn request; no conversational memory is kept between calls.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::EnvironmentError("GEMINI_API_KEY not set".to_string()))?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send one rendered prompt and return the raw response text. Transport
    /// and service failures all surface here undifferentiated; classifying
    /// them is the caller's job.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationSettings {
                temperature: 1.0,
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATE_ENDPOINT, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        body.candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .filter_map(|content| content.parts)
            .flatten()
            .filter_map(|part| part.text)
            .next()
            .ok_or(GeminiError::EmptyResponse)
    }
}
