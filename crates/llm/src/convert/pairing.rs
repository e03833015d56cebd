//! Enforces that every announced tool call is answered right away.
//!
//! The flat schema requires an assistant message with `tool_calls` to be followed
//! immediately by one tool message per call. Block-structured histories do not always
//! satisfy that: results get lost when a conversation is truncated, or arrive after an
//! unrelated turn. Rather than rejecting such a request, unanswered calls and orphaned
//! results are removed.

use std::collections::HashSet;

use config::ToolCallPairing;

use crate::protocol::openai::{ChatMessage, ToolCall};

/// Removes tool calls without an immediately following result, and results without an
/// immediately preceding call.
///
/// Works in a single forward pass. An assistant message with tool calls opens a set of
/// call ids; the tool messages right after it are matched against that set, and the
/// first message that is not a tool message closes it. Forwarded messages with the
/// `tool` role count as tool messages and pair on their `tool_call_id` field. Closing
/// decides, according to `policy`, which calls the assistant message keeps and whether
/// the message survives.
/// Everything else passes through in its original order.
pub fn validate_tool_calls(messages: Vec<ChatMessage>, policy: ToolCallPairing) -> Vec<ChatMessage> {
    let mut validated = Vec::with_capacity(messages.len());
    let mut open: Option<OpenToolCalls> = None;

    for message in messages {
        match message {
            message if message.is_tool() => {
                let id = message.tool_call_id().map(str::to_owned);

                match (open.as_mut(), id) {
                    (Some(calls), Some(id)) if calls.announced(&id) => calls.answer(message),
                    (_, Some(id)) => log::debug!("Dropping tool result `{id}`: no matching tool call precedes it"),
                    (_, None) => log::debug!("Dropping tool message without a tool call id"),
                }
            }
            ChatMessage::Assistant {
                content,
                tool_calls: Some(tool_calls),
            } => {
                if let Some(calls) = open.take() {
                    calls.close(policy, &mut validated);
                }

                open = Some(OpenToolCalls::new(content, tool_calls));
            }
            message => {
                if let Some(calls) = open.take() {
                    calls.close(policy, &mut validated);
                }

                validated.push(message);
            }
        }
    }

    if let Some(calls) = open {
        calls.close(policy, &mut validated);
    }

    validated
}

/// An assistant turn whose tool calls are waiting for their results.
struct OpenToolCalls {
    content: Option<String>,
    calls: Vec<ToolCall>,
    announced: HashSet<String>,
    answered: HashSet<String>,
    results: Vec<ChatMessage>,
}

impl OpenToolCalls {
    fn new(content: Option<String>, calls: Vec<ToolCall>) -> Self {
        let announced = calls.iter().map(|call| call.id.clone()).collect();

        Self {
            content,
            calls,
            announced,
            answered: HashSet::new(),
            results: Vec::new(),
        }
    }

    fn announced(&self, id: &str) -> bool {
        self.announced.contains(id)
    }

    fn answer(&mut self, result: ChatMessage) {
        if let Some(id) = result.tool_call_id() {
            self.answered.insert(id.to_owned());
        }

        self.results.push(result);
    }

    fn close(self, policy: ToolCallPairing, output: &mut Vec<ChatMessage>) {
        let Self {
            content,
            calls,
            answered,
            results,
            ..
        } = self;

        let (paired, unpaired): (Vec<_>, Vec<_>) = calls.into_iter().partition(|call| answered.contains(&call.id));

        for call in &unpaired {
            log::debug!(
                "Dropping tool call `{}` ({}): no tool result follows it",
                call.id,
                call.function.name
            );
        }

        let (tool_calls, results) = match policy {
            ToolCallPairing::AllOrNothing if !unpaired.is_empty() => {
                for id in results.iter().filter_map(ChatMessage::tool_call_id) {
                    log::debug!("Dropping tool result `{id}`: its assistant message lost its tool calls");
                }

                (Vec::new(), Vec::new())
            }
            ToolCallPairing::AllOrNothing | ToolCallPairing::KeepPaired => (paired, results),
        };

        let has_text = content.as_deref().is_some_and(|text| !text.is_empty());

        if !has_text && tool_calls.is_empty() {
            log::debug!("Dropping assistant message left without content or tool calls");
            return;
        }

        output.push(ChatMessage::Assistant {
            content,
            tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
        });

        output.extend(results);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn validate(messages: Value, policy: ToolCallPairing) -> Value {
        let messages: Vec<ChatMessage> = serde_json::from_value(messages).unwrap();
        serde_json::to_value(validate_tool_calls(messages, policy)).unwrap()
    }

    fn call(id: &str) -> Value {
        json!({ "id": id, "type": "function", "function": { "name": "f", "arguments": "{}" } })
    }

    fn result(id: &str) -> Value {
        json!({ "role": "tool", "tool_call_id": id, "content": format!("result of {id}") })
    }

    #[test]
    fn paired_calls_are_kept() {
        let messages = json!([
            { "role": "user", "content": "go" },
            { "role": "assistant", "content": null, "tool_calls": [call("t1"), call("t2")] },
            result("t2"),
            result("t1"),
            { "role": "assistant", "content": "done" }
        ]);

        assert_eq!(validate(messages.clone(), ToolCallPairing::KeepPaired), messages);
        assert_eq!(validate(messages.clone(), ToolCallPairing::AllOrNothing), messages);
    }

    #[test]
    fn unanswered_calls_are_trimmed() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1"), call("t2")] },
            result("t2")
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([
                { "role": "assistant", "content": null, "tool_calls": [call("t2")] },
                result("t2")
            ])
        );
    }

    #[test]
    fn assistant_without_answers_loses_tool_calls() {
        let messages = json!([
            { "role": "assistant", "content": "Let me look.", "tool_calls": [call("t1")] },
            { "role": "user", "content": "never mind" }
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([
                { "role": "assistant", "content": "Let me look." },
                { "role": "user", "content": "never mind" }
            ])
        );
    }

    #[test]
    fn assistant_without_answers_or_text_is_dropped() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
            result("t2"),
            { "role": "assistant", "content": "", "tool_calls": [call("t3")] }
        ]);

        assert_eq!(validate(messages, ToolCallPairing::KeepPaired), json!([]));
    }

    #[test]
    fn orphaned_results_are_dropped() {
        let messages = json!([
            result("t0"),
            { "role": "user", "content": "hi" },
            result("t1"),
            { "role": "assistant", "content": "plain" },
            result("t2")
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "plain" }
            ])
        );
    }

    #[test]
    fn result_after_unrelated_message_is_orphaned() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
            { "role": "user", "content": "interrupting" },
            result("t1")
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([{ "role": "user", "content": "interrupting" }])
        );
    }

    #[test]
    fn results_only_match_the_nearest_announcement() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
            result("t1"),
            { "role": "assistant", "content": null, "tool_calls": [call("t2")] },
            result("t1"),
            result("t2")
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([
                { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
                result("t1"),
                { "role": "assistant", "content": null, "tool_calls": [call("t2")] },
                result("t2")
            ])
        );
    }

    #[test]
    fn every_result_for_a_kept_call_is_kept() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
            result("t1"),
            result("t9"),
            result("t1")
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([
                { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
                result("t1"),
                result("t1")
            ])
        );
    }

    #[test]
    fn all_or_nothing_drops_partially_answered_turns() {
        let messages = json!([
            { "role": "assistant", "content": "Two lookups.", "tool_calls": [call("t1"), call("t2")] },
            result("t1"),
            { "role": "assistant", "content": null, "tool_calls": [call("t3"), call("t4")] },
            result("t4"),
            { "role": "user", "content": "next" }
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::AllOrNothing),
            json!([
                { "role": "assistant", "content": "Two lookups." },
                { "role": "user", "content": "next" }
            ])
        );
    }

    #[test]
    fn other_roles_pass_through_and_close_the_run() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1")] },
            { "role": "developer", "content": "note" },
            result("t1")
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([{ "role": "developer", "content": "note" }])
        );
    }

    #[test]
    fn forwarded_tool_messages_stay_inside_the_run() {
        let messages = json!([
            { "role": "assistant", "content": null, "tool_calls": [call("t1"), call("t2")] },
            { "role": "tool", "content": "stray" },
            { "role": "tool", "tool_call_id": "t2", "content": [{ "type": "text", "text": "structured" }] },
            result("t1"),
            { "role": "tool", "tool_call_id": "t9", "content": [] }
        ]);

        assert_eq!(
            validate(messages, ToolCallPairing::KeepPaired),
            json!([
                { "role": "assistant", "content": null, "tool_calls": [call("t1"), call("t2")] },
                { "role": "tool", "tool_call_id": "t2", "content": [{ "type": "text", "text": "structured" }] },
                result("t1")
            ])
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(validate(json!([]), ToolCallPairing::KeepPaired), json!([]));
    }
}
