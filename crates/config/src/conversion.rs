//! Policies applied when reshaping block-structured chat requests into flat ones.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Configuration for the request converter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// What to do with an assistant turn whose tool calls are only partly answered.
    pub tool_call_pairing: ToolCallPairing,
    /// When system blocks receive an ephemeral cache-control hint.
    pub cache_control: CacheControlConfig,
    /// Model name aliases.
    pub models: ModelAliases,
}

/// Policy for assistant messages whose announced tool calls are not all followed by a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallPairing {
    /// Keep the calls that have a result, drop the rest. The message stays as long as it
    /// still has text or at least one call.
    #[default]
    KeepPaired,
    /// Drop every call of the message, and the results that answered them, as soon as one
    /// call has no result. The message stays only if it has text.
    AllOrNothing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheControlConfig {
    pub enabled: bool,
    /// Case-sensitive substrings of the request model name.
    pub model_patterns: Vec<String>,
}

impl Default for CacheControlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_patterns: vec!["claude".to_string()],
        }
    }
}

impl CacheControlConfig {
    /// Whether system blocks for `model` should carry a cache-control hint.
    pub fn applies_to(&self, model: &str) -> bool {
        self.enabled && self.model_patterns.iter().any(|pattern| model.contains(pattern.as_str()))
    }
}

/// Maps bare model names to the identifier the backend expects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ModelAliases(BTreeMap<String, String>);

impl ModelAliases {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ModelAliases {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_control_matching() {
        let config = CacheControlConfig::default();

        assert!(config.applies_to("claude-3-5-sonnet-20241022"));
        assert!(config.applies_to("anthropic/claude-sonnet-4"));
        assert!(!config.applies_to("gpt-4o"));
        assert!(!config.applies_to("Claude-3"));

        let disabled = CacheControlConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(!disabled.applies_to("claude-3-5-sonnet-20241022"));
    }

    #[test]
    fn aliases_lookup() {
        let aliases: ModelAliases = [("sonnet".to_string(), "anthropic/claude-sonnet-4".to_string())]
            .into_iter()
            .collect();

        assert_eq!(aliases.get("sonnet"), Some("anthropic/claude-sonnet-4"));
        assert_eq!(aliases.get("opus"), None);
        assert!(!aliases.is_empty());
    }
}
