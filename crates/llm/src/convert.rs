//! Request-level conversion from the block-structured schema to the flat one.

mod flatten;
mod pairing;

use config::ConversionConfig;

use crate::{
    error::ConversionError,
    model,
    protocol::{
        anthropic::{self, CacheControl, SystemPrompt},
        openai::{self, ChatMessage, ContentPart},
    },
};

pub use flatten::flatten_messages;
pub use pairing::validate_tool_calls;

/// Converts requests according to a [`ConversionConfig`].
///
/// Holds no per-request state; one converter can serve any number of requests
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Builds the outgoing request: system messages first, then the flattened and
    /// validated conversation. Never fails; content that cannot be represented is dropped.
    pub fn convert(&self, request: anthropic::Request) -> openai::ChatCompletionRequest {
        let anthropic::Request {
            model,
            messages,
            system,
            temperature,
            tools,
            stream,
            ..
        } = request;

        let input_messages = messages.len();
        let cache_control = self.config.cache_control.applies_to(&model);

        let mut converted = system_messages(system, cache_control);
        converted.extend(validate_tool_calls(
            flatten_messages(messages),
            self.config.tool_call_pairing,
        ));

        log::debug!(
            "Converted request for model '{model}': {input_messages} input messages, {} output messages",
            converted.len()
        );

        openai::ChatCompletionRequest {
            model: self.map_model_name(&model),
            messages: converted,
            temperature,
            tools: tools.map(|tools| tools.into_iter().map(openai::Tool::from).collect()),
            stream,
        }
    }

    /// Converts a JSON request body into a JSON request body.
    pub fn convert_slice(&self, body: &[u8]) -> crate::Result<Vec<u8>> {
        let converted = self.convert(parse_request(body)?);
        serde_json::to_vec(&converted).map_err(ConversionError::Encode)
    }

    /// Same as [`Converter::convert_slice`], with the output indented for reading.
    pub fn convert_slice_pretty(&self, body: &[u8]) -> crate::Result<Vec<u8>> {
        let converted = self.convert(parse_request(body)?);
        serde_json::to_vec_pretty(&converted).map_err(ConversionError::Encode)
    }

    /// Resolves the model name the backend should receive.
    pub fn map_model_name(&self, name: &str) -> String {
        model::map_model_name(name, &self.config.models)
    }
}

fn parse_request(body: &[u8]) -> crate::Result<anthropic::Request> {
    serde_json::from_slice(body).map_err(ConversionError::InvalidRequest)
}

/// One system message per system entry, each wrapping a single text part.
fn system_messages(system: Option<SystemPrompt>, cache_control: bool) -> Vec<ChatMessage> {
    let texts = system.map(SystemPrompt::into_texts).unwrap_or_default();

    texts
        .into_iter()
        .map(|text| ChatMessage::System {
            content: vec![ContentPart::Text {
                text,
                cache_control: cache_control.then(CacheControl::ephemeral),
            }],
        })
        .collect()
}

impl From<anthropic::Tool> for openai::Tool {
    fn from(tool: anthropic::Tool) -> Self {
        Self {
            tool_type: openai::ToolCallType::Function,
            function: openai::FunctionDefinition {
                name: tool.name,
                description: tool.description,
                parameters: tool.input_schema,
            },
        }
    }
}
