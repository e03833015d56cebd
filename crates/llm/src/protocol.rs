//! Wire models for the two chat schemas the converter sits between.
//!
//! [`anthropic`] is the inbound shape: messages carry typed content blocks and the
//! system prompt lives outside the message list. [`openai`] is the outbound shape: flat
//! role/content messages, tool calls listed on the assistant turn, and one standalone
//! tool message per result.

pub mod anthropic;
pub mod openai;
pub(crate) mod unknown_fields;

pub use unknown_fields::UnknownFields;
