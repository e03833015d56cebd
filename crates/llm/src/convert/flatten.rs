//! Block-structured messages to flat role/content messages.

use crate::protocol::{
    anthropic::{ContentBlock, InputMessage, InputMessageContent, Role},
    openai::{ChatMessage, FunctionCall, ToolCall, ToolCallType},
};

/// Flattens the conversation, keeping message order.
///
/// An assistant message keeps its text and its tool calls together in one message. A
/// user message becomes an optional text message followed by one tool message per tool
/// result, in the order the results appeared. Other roles are forwarded unchanged.
/// Messages whose content is neither a string nor a block list produce nothing.
pub fn flatten_messages(messages: Vec<InputMessage>) -> Vec<ChatMessage> {
    let mut flattened = Vec::with_capacity(messages.len());

    for message in messages {
        flatten_message(message, &mut flattened);
    }

    flattened
}

fn flatten_message(message: InputMessage, output: &mut Vec<ChatMessage>) {
    let InputMessage {
        role,
        content,
        unknown_fields,
    } = message;

    match (role, content) {
        (role, InputMessageContent::Unsupported(value)) => {
            log::debug!("Skipping {role:?} message with unsupported content: {value}");
        }
        (Role::Assistant, InputMessageContent::Text(text)) => output.push(ChatMessage::Assistant {
            content: Some(text),
            tool_calls: None,
        }),
        (Role::Assistant, InputMessageContent::Blocks(blocks)) => match assistant_message(blocks) {
            Some(message) => output.push(message),
            None => log::debug!("Dropping assistant message with neither text nor tool calls"),
        },
        (Role::User, InputMessageContent::Text(text)) => output.push(ChatMessage::User { content: text }),
        (Role::User, InputMessageContent::Blocks(blocks)) => user_messages(blocks, output),
        (role @ (Role::System | Role::Unknown(_)), content) => {
            output.push(ChatMessage::Passthrough(InputMessage {
                role,
                content,
                unknown_fields,
            }));
        }
    }
}

fn assistant_message(blocks: Vec<ContentBlock>) -> Option<ChatMessage> {
    let mut text = TextBuffer::default();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text(block) => text.push(&block.text.to_text()),
            ContentBlock::ToolUse(block) => tool_calls.push(ToolCall {
                id: block.id,
                tool_type: ToolCallType::Function,
                function: FunctionCall {
                    name: block.name,
                    arguments: block.input.to_string(),
                },
            }),
            ContentBlock::ToolResult(block) => {
                log::debug!(
                    "Ignoring tool result for `{}` inside an assistant message",
                    block.tool_use_id
                );
            }
            ContentBlock::Unknown(_) => (),
        }
    }

    let content = text.finish();

    if content.is_none() && tool_calls.is_empty() {
        return None;
    }

    Some(ChatMessage::Assistant {
        content,
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
    })
}

fn user_messages(blocks: Vec<ContentBlock>, output: &mut Vec<ChatMessage>) {
    let mut text = TextBuffer::default();
    let mut tool_results = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text(block) => text.push(&block.text.to_text()),
            ContentBlock::ToolResult(block) => tool_results.push(ChatMessage::Tool {
                content: block.content_text(),
                tool_call_id: block.tool_use_id,
            }),
            ContentBlock::ToolUse(block) => {
                log::debug!("Ignoring tool use `{}` inside a user message", block.id);
            }
            ContentBlock::Unknown(_) => (),
        }
    }

    if let Some(content) = text.finish() {
        output.push(ChatMessage::User { content });
    }

    output.extend(tool_results);
}

/// Joins text blocks with newlines and trims the result.
#[derive(Default)]
struct TextBuffer(String);

impl TextBuffer {
    fn push(&mut self, text: &str) {
        self.0.push_str(text);
        self.0.push('\n');
    }

    fn finish(self) -> Option<String> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}
