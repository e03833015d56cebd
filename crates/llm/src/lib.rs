//! Converts block-structured chat requests into flat chat-completions requests.
//!
//! Incoming messages carry typed content blocks: text, tool invocations written by the
//! assistant and tool results written by the user. The outgoing schema wants flat
//! role/content messages, tool calls listed on the assistant message, and each result
//! as its own `tool` message placed directly after the call that produced it.
//!
//! Conversion runs in two steps: [`flatten_messages`] reshapes the conversation and
//! [`validate_tool_calls`] removes tool calls and results that would break the pairing
//! rule. [`Converter::convert`] adds the system prompt, tool definitions and the
//! remaining request fields around them.
//!
//! ```
//! use llm::protocol::anthropic::{InputMessage, Request, Role};
//!
//! let request = Request::new("gpt-4o", vec![InputMessage::new(Role::User, "hi")]);
//! let converted = llm::convert(request);
//!
//! assert_eq!(converted.messages.len(), 1);
//! ```

mod convert;
mod error;
mod model;
pub mod protocol;

pub use convert::{Converter, flatten_messages, validate_tool_calls};
pub use error::{ConversionError, Result};

/// Converts a request with the default configuration.
pub fn convert(request: protocol::anthropic::Request) -> protocol::openai::ChatCompletionRequest {
    Converter::default().convert(request)
}

/// Maps a model name with the default configuration, which leaves every name unchanged.
pub fn map_model_name(name: &str) -> String {
    Converter::default().map_model_name(name)
}
