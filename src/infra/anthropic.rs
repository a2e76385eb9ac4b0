use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::ModelSettings;
use crate::domain::diff::StagedDiff;
use crate::domain::prompt::build_prompt;
use crate::domain::summary::Summary;
use crate::error::{AppError, AppResult, SummaryError};
use crate::services::LanguageModelService;

const API_KEY_HEADER: &str = "x-api-key";
const API_VERSION_HEADER: &str = "anthropic-version";
const CREDIT_BALANCE_PHRASE: &str = "credit balance";
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct AnthropicClient {
    http: Client,
    settings: ModelSettings,
}

impl AnthropicClient {
    pub fn new(settings: ModelSettings) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http, settings })
    }

    fn request_error(&self, err: reqwest::Error) -> SummaryError {
        if err.is_timeout() {
            SummaryError::Timeout(self.settings.timeout)
        } else {
            SummaryError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl LanguageModelService for AnthropicClient {
    async fn summarize(
        &self,
        diff: &StagedDiff,
        scope: Option<&str>,
        api_key: &str,
    ) -> Result<Summary, SummaryError> {
        let request_body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            messages: vec![RequestMessage {
                role: "user",
                content: build_prompt(diff, scope),
            }],
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .header(API_KEY_HEADER, api_key)
            .header(API_VERSION_HEADER, &self.settings.api_version)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| self.request_error(err))?;

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        let payload: MessagesResponse = serde_json::from_str(&body)
            .map_err(|err| SummaryError::MalformedResponse(err.to_string()))?;
        let text = payload
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                SummaryError::MalformedResponse("no text in first content block".to_string())
            })?;

        Summary::parse(&text).ok_or(SummaryError::EmptySummary)
    }
}

/// Maps a non-success response to an error, singling out an exhausted
/// account balance so the user gets a billing-specific hint.
fn classify_failure(status: StatusCode, body: &str) -> SummaryError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok();

    let haystack = message.as_deref().unwrap_or(body).to_lowercase();
    if haystack.contains(CREDIT_BALANCE_PHRASE) {
        return SummaryError::InsufficientCredit;
    }

    let message = message.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "<empty body>".to_string()
        } else {
            trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
        }
    });
    SummaryError::Status { status, message }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    messages: Vec<RequestMessage>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}
