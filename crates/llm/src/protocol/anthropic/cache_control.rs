use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::unknown_fields::UnknownFields;

/// Cache-control hint attached to a content block.
///
/// The converter never interprets the hint; it only forwards it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CacheControl {
    Ephemeral {
        /// Optional TTL defining how long the cached segment should live.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ttl: Option<CacheControlTtl>,

        /// Unspecified cache-control properties retained verbatim.
        #[serde(flatten)]
        unknown_fields: UnknownFields,
    },
    #[serde(untagged)]
    Unknown(Value),
}

impl CacheControl {
    /// A bare `{"type": "ephemeral"}` hint.
    pub fn ephemeral() -> Self {
        Self::Ephemeral {
            ttl: None,
            unknown_fields: UnknownFields::default(),
        }
    }
}

/// Supported TTL values for ephemeral cache control.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum CacheControlTtl {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(untagged)]
    Unknown(String),
}
