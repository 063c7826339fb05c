use crate::error::LookupError;
use crate::lookup::{LookupResult, WordLookup, parse_lookup_response};
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

const SYSTEM_PROMPT: &str = "You are a Spanish-language dictionary. You answer with precise \
dictionary definitions and never invent words.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Maps an API error message onto the lookup error taxonomy.
pub fn classify_api_error(message: &str) -> LookupError {
    let lower = message.to_lowercase();
    if lower.contains("401")
        || lower.contains("403")
        || lower.contains("unauthorized")
        || lower.contains("api key")
    {
        LookupError::Auth(message.to_string())
    } else if lower.contains("429") || lower.contains("rate limit") {
        LookupError::RateLimited(message.to_string())
    } else {
        LookupError::Network(message.to_string())
    }
}

pub fn build_lookup_prompt(term: &str) -> String {
    format!(
        r#"Look up this term and respond ONLY with valid JSON.

Term: {}

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "found": boolean,
    "word": "the term in its dictionary form",
    "language": "ISO 639-1 code of the term's language",
    "isSpanish": boolean,
    "definitions": [
        {{
            "definition": "definition written in Spanish",
            "category": "grammatical category or null",
            "usage": "example sentence or null",
            "synonyms": ["synonym1"],
            "antonyms": ["antonym1"]
        }}
    ],
    "etymology": "short etymology or null"
}}
- Order definitions from most to least common.
- If the term is not a real word in any language, respond with {{"found": false}}.
"#,
        term
    )
}

/// Word lookup backed by a chat model on OpenRouter.
///
/// The API key is read from `OPENROUTER_API_KEY`.
#[derive(Debug)]
pub struct OpenRouterLookup {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

impl OpenRouterLookup {
    pub fn new(config: ModelConfig) -> Result<Self, LookupError> {
        let client = openrouter_api::OpenRouterClient::quick().map_err(|e| {
            LookupError::Auth(format!("Failed to create OpenRouter client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn source(&self) -> String {
        format!("openrouter:{}", self.config.model)
    }

    async fn complete(&self, prompt: &str) -> Result<String, LookupError> {
        let messages = vec![
            Message::text("system", SYSTEM_PROMPT),
            Message::text("user", prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| classify_api_error(&e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| classify_api_error(&format!("OpenRouter API error: {}", e)))?;

        let Some(choice) = response.choices.first() else {
            return Err(LookupError::MalformedResponse(
                "No response choices received".to_string(),
            ));
        };

        match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
            openrouter_api::MessageContent::Parts(parts) => {
                let text_parts: Vec<String> = parts
                    .iter()
                    .filter_map(|p| {
                        if let openrouter_api::ContentPart::Text(tc) = p {
                            Some(tc.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect();
                Ok(text_parts.join("\n"))
            }
        }
    }
}

#[async_trait]
impl WordLookup for OpenRouterLookup {
    async fn lookup(&self, term: &str) -> Result<LookupResult, LookupError> {
        let prompt = build_lookup_prompt(term);
        let response = self.complete(&prompt).await?;
        parse_lookup_response(term, &response, &self.source())
    }
}
