use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::unknown_fields::UnknownFields;

use super::cache_control::CacheControl;

/// Tool definition offered to the model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tool {
    /// Unique tool name surfaced to the model and in tool_use blocks.
    #[serde(default)]
    pub name: String,

    /// Optional natural-language description of the tool's purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema describing the tool's expected input payload.
    #[serde(default)]
    pub input_schema: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,

    /// Additional tool fields.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}
