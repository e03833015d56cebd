use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::unknown_fields::UnknownFields;

use super::*;

/// Request body in the block-structured chat schema.
///
/// Only the fields the outgoing request carries are modelled; everything else the
/// caller sent is kept in `unknown_fields` and not forwarded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    /// The model that will complete the prompt.
    pub model: String,

    /// Conversation turns.
    #[serde(default)]
    pub messages: Vec<InputMessage>,

    /// System prompt providing global instructions for the assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemPrompt>,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Tool specifications the model may call during this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,

    /// When true, the caller expects a streamed response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Additional fields (max_tokens, metadata, thinking, ...) that have no counterpart here.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

impl Request {
    pub fn new(model: impl Into<String>, messages: Vec<InputMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            system: None,
            temperature: None,
            tools: None,
            stream: None,
            unknown_fields: UnknownFields::default(),
        }
    }
}

/// System prompt payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SystemPrompt {
    /// Plain-text system prompt.
    Text(String),
    /// Structured system prompt comprised of content blocks.
    Blocks(Vec<SystemBlock>),
    /// Any other shape, treated as a single entry.
    Unknown(Value),
}

impl SystemPrompt {
    /// Text of every system entry, in order.
    pub fn into_texts(self) -> Vec<String> {
        match self {
            SystemPrompt::Text(text) => vec![text],
            SystemPrompt::Blocks(blocks) => blocks.iter().map(SystemBlock::to_text).collect(),
            SystemPrompt::Unknown(value @ Value::Object(_)) => vec![text_field(&value)],
            SystemPrompt::Unknown(value) => vec![value.to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemBlock {
    Text(TextBlock),
    #[serde(untagged)]
    Unknown(Value),
}

impl SystemBlock {
    /// Text carried by the block, or the empty string when there is none.
    pub fn to_text(&self) -> String {
        match self {
            SystemBlock::Text(block) => block.text.to_text(),
            SystemBlock::Unknown(value) => text_field(value),
        }
    }
}

fn text_field(value: &Value) -> String {
    match value.get("text") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
