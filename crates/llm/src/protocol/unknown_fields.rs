use std::collections::BTreeMap;

/// Fields a protocol type does not model, kept so a message can be forwarded as it was received.
#[derive(Default, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnknownFields(BTreeMap<String, serde_json::Value>);

impl UnknownFields {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}
