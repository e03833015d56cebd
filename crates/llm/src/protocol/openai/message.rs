use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::anthropic::{CacheControl, InputMessage};

use super::ToolCallType;

/// One message of the flat conversation, tagged by its role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: Vec<ContentPart>,
    },
    User {
        content: String,
    },
    Assistant {
        /// `null` when the turn only announces tool calls.
        content: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
    /// A message with a role the converter does not reshape, forwarded as received.
    #[serde(untagged)]
    Passthrough(InputMessage),
}

impl ChatMessage {
    /// Tool calls announced by an assistant message, if any.
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        match self {
            ChatMessage::Assistant {
                tool_calls: Some(calls), ..
            } => Some(calls),
            _ => None,
        }
    }

    /// Tool results, including forwarded messages with the `tool` role.
    pub fn is_tool(&self) -> bool {
        match self {
            ChatMessage::Tool { .. } => true,
            ChatMessage::Passthrough(message) => message.role.is_tool(),
            _ => false,
        }
    }

    /// The call a tool result answers. A forwarded tool message may not name one.
    pub fn tool_call_id(&self) -> Option<&str> {
        match self {
            ChatMessage::Tool { tool_call_id, .. } => Some(tool_call_id),
            ChatMessage::Passthrough(message) if message.role.is_tool() => {
                message.unknown_fields.get("tool_call_id").and_then(Value::as_str)
            }
            _ => None,
        }
    }
}

/// A typed part of a structured message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,

        /// Opaque hint forwarded to the backend.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cache_control: Option<CacheControl>,
    },
}

/// A tool call announced by an assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub tool_type: ToolCallType,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,

    /// JSON-encoded arguments.
    pub arguments: String,
}
