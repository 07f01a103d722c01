use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{CollaboratorError, SemanticMatcher, parse_match_response};
use crate::{session::MatchRequest, types::match_candidate::MatchCandidate};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach an OpenAI-compatible chat completion API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key. The key itself
    /// is never written to the configuration file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    debug!("Using default matcher base URL: {DEFAULT_BASE_URL}");
    DEFAULT_BASE_URL.to_owned()
}

fn default_model() -> String {
    debug!("Using default matcher model: {DEFAULT_MODEL}");
    DEFAULT_MODEL.to_owned()
}

fn default_api_key_env() -> String {
    debug!("Using default API key variable: {DEFAULT_API_KEY_ENV}");
    DEFAULT_API_KEY_ENV.to_owned()
}

fn default_timeout_secs() -> u64 {
    debug!("Using default matcher timeout (s): {DEFAULT_TIMEOUT_SECS}");
    DEFAULT_TIMEOUT_SECS
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Asks a chat completion model for the passage of the target text that is
/// closest in meaning to the selection.
#[derive(Clone)]
pub struct ChatCompletionMatcher {
    config: MatcherConfig,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for ChatCompletionMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionMatcher")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ChatCompletionMatcher {
    /// Read the API key from the configured environment variable and set up
    /// the HTTP client.
    ///
    /// # Errors
    ///
    /// If the API key is missing or the HTTP client cannot be created.
    pub fn new(config: MatcherConfig) -> Result<Self, CollaboratorError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CollaboratorError::MissingApiKey(config.api_key_env.clone()))?;

        Self::with_api_key(config, api_key)
    }

    /// # Errors
    ///
    /// If the HTTP client cannot be created.
    pub fn with_api_key(
        config: MatcherConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| CollaboratorError::Transport(error.to_string()))?;

        Ok(Self {
            config,
            api_key: api_key.into(),
            client,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig { &self.config }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|error| CollaboratorError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|error| CollaboratorError::Unparseable(error.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CollaboratorError::EmptyResponse)
    }
}

#[async_trait]
impl SemanticMatcher for ChatCompletionMatcher {
    async fn find_similar(&self, request: &MatchRequest) -> Result<MatchCandidate, CollaboratorError> {
        info!(
            "Asking {} for text similar to highlight {}",
            self.config.model, request.highlight_id
        );

        let reply = self.complete(&prompt(request)).await?;
        debug!("Semantic matcher replied: {reply}");

        parse_match_response(&reply)
    }
}

/// The instruction sent to the model. Offsets are requested in characters,
/// but they are only ever used as hints.
fn prompt(request: &MatchRequest) -> String {
    format!(
        r#"Source text: "{source}"
Target text: "{target}"
Sentence or passage selected in the source text: "{selected}"

Task:
1. Analyse the selected passage of the source text carefully and understand its core meaning.
2. Find the smallest unit of the target text (a phrase, clause or sentence) that is most similar to the selection.
3. The returned text should match the core meaning of the selection as precisely as possible, without unnecessary extra information.
4. If the similar text is part of a longer sentence, return only the part most relevant to the selection.
5. Return the similar text together with its exact start and end character indices in the target text.

Respond with a JSON object in the following format:
{{
  "similar_text": "the most similar and most precise passage found",
  "start": start index,
  "end": end index,
  "explanation": "a short explanation of why this passage is the most similar and how it matches the core meaning of the selection"
}}

Return only the JSON object, without any other text or formatting. Make sure the returned passage is the most precise match and contains nothing superfluous."#,
        source = request.source_text,
        target = request.target_text,
        selected = request.selected_text,
    )
}
