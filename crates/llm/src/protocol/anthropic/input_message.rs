use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::unknown_fields::UnknownFields;

use super::cache_control::CacheControl;

/// A single conversation turn as sent by the caller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputMessage {
    /// Originating role for the message turn. A message without one is forwarded without one.
    #[serde(default, skip_serializing_if = "Role::is_missing")]
    pub role: Role,

    /// Message body provided as text or structured blocks.
    #[serde(default)]
    pub content: InputMessageContent,

    /// Extra message fields passed through untouched.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

impl InputMessage {
    pub fn new(role: Role, content: impl Into<InputMessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
            unknown_fields: UnknownFields::default(),
        }
    }
}

/// Message roles. Anything we do not recognize is carried as [`Role::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    #[serde(untagged)]
    Unknown(String),
}

impl Role {
    /// Tool results sent as standalone messages rather than as blocks.
    pub fn is_tool(&self) -> bool {
        matches!(self, Role::Unknown(role) if role == "tool")
    }

    fn is_missing(&self) -> bool {
        matches!(self, Role::Unknown(role) if role.is_empty())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Unknown(String::new())
    }
}

/// Message content may be provided as a raw string or as structured content blocks.
///
/// Anything else is kept in [`InputMessageContent::Unsupported`] so the message can be
/// skipped during conversion instead of failing the whole request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum InputMessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Unsupported(Value),
}

impl Default for InputMessageContent {
    fn default() -> Self {
        Self::Unsupported(Value::Null)
    }
}

impl From<String> for InputMessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for InputMessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<ContentBlock>> for InputMessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

/// Structured content blocks.
///
/// Only text, tool use and tool result blocks take part in the conversion. Images,
/// documents, thinking and server-side tool blocks deserialize into
/// [`ContentBlock::Unknown`] and are left out of the converted conversation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(TextBlock),
    ToolUse(ToolUseBlock),
    ToolResult(ToolResultBlock),
    #[serde(untagged)]
    Unknown(Value),
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextBlock {
            text: TextBody::Plain(text.into()),
            cache_control: None,
            unknown_fields: UnknownFields::default(),
        })
    }

    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self::ToolUse(ToolUseBlock {
            id: id.into(),
            name: name.into(),
            input,
            cache_control: None,
            unknown_fields: UnknownFields::default(),
        })
    }

    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<Value>) -> Self {
        Self::ToolResult(ToolResultBlock {
            tool_use_id: tool_use_id.into(),
            content: Some(content.into()),
            is_error: None,
            cache_control: None,
            unknown_fields: UnknownFields::default(),
        })
    }
}

/// Text content block.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextBlock {
    /// Text body. Callers occasionally send a non-string value here.
    pub text: TextBody,

    /// Optional cache-control hints attached to the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,

    /// Additional fields retained for forward compatibility.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

/// The `text` field of a text block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TextBody {
    Plain(String),
    Structured(Value),
}

impl TextBody {
    /// The text as a string; structured values are rendered as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            TextBody::Plain(text) => text.clone(),
            TextBody::Structured(value) => value.to_string(),
        }
    }
}

/// Tool invocation authored by the assistant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolUseBlock {
    /// Unique identifier referencing the tool use.
    pub id: String,

    /// Name of the tool being invoked.
    pub name: String,

    /// Tool input payload.
    #[serde(default)]
    pub input: Value,

    /// Optional cache-control hints associated with the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,

    /// Additional unknown fields preserved verbatim.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

/// Tool result block describing the outcome of a tool invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolResultBlock {
    /// Identifier of the tool use this result corresponds to.
    pub tool_use_id: String,

    /// Optional content returned by the tool (string or block array).
    #[serde(default)]
    pub content: Option<Value>,

    /// Indicates whether the tool invocation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,

    /// Optional cache-control configuration for the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,

    /// Unknown fields retained for schema-forward compatibility.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

impl ToolResultBlock {
    /// The result as message text. Strings pass through, other values are encoded as JSON
    /// and a missing result becomes the empty string.
    pub fn content_text(&self) -> String {
        match &self.content {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }
}
