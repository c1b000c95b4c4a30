//! Entry classification: one raw log entry in, zero to four messages out.
//!
//! Fields are checked independently, always in the same order:
//! rationale, tool call, observation, error. Entries with none of them
//! produce nothing.

use agentstream_core::entry::RawLogEntry;
use agentstream_core::message::Message;

/// Tool name whose arguments are source code and get rendered as a code block.
pub const CODE_INTERPRETER: &str = "code interpreter";

/// Classify a single log entry.
pub fn classify(entry: &RawLogEntry) -> Vec<Message> {
    let mut messages = Vec::with_capacity(4);

    if let Some(rationale) = entry.rationale.as_deref()
        && !rationale.is_empty()
    {
        messages.push(Message::thought(rationale));
    }

    if let Some(call) = &entry.tool_call {
        let arguments = call.arguments_text();
        let content = if call.tool_name == CODE_INTERPRETER {
            fence_code(&arguments)
        } else {
            arguments
        };
        messages.push(Message::tool_call(&call.tool_name, content));
    }

    if let Some(observation) = entry.observation.as_deref()
        && !observation.is_empty()
    {
        messages.push(Message::thought(observation));
    }

    if let Some(error) = entry.error_text() {
        messages.push(Message::error(error));
    }

    messages
}

/// Classify entries in order.
pub fn classify_all<'a, I>(entries: I) -> Vec<Message>
where
    I: IntoIterator<Item = &'a RawLogEntry>,
{
    entries.into_iter().flat_map(classify).collect()
}

fn fence_code(code: &str) -> String {
    format!("```py\n{code}\n```")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rationale_only() {
        let messages = classify(&RawLogEntry::rationale("I should search first"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), Some("I should search first"));
        assert!(messages[0].is_intermediate);
        assert!(!messages[0].is_error);
        assert!(messages[0].tool_name.is_none());
    }

    #[test]
    fn code_interpreter_arguments_are_fenced() {
        let messages = classify(&RawLogEntry::tool_call(CODE_INTERPRETER, "print(2 + 2)"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), Some("```py\nprint(2 + 2)\n```"));
        assert_eq!(messages[0].tool_name.as_deref(), Some("code interpreter"));
        assert!(messages[0].is_intermediate);
    }

    #[test]
    fn other_tool_arguments_are_verbatim() {
        let messages = classify(&RawLogEntry::tool_call("search", "weather in `Paris`"));
        assert_eq!(messages[0].text(), Some("weather in `Paris`"));
        assert_eq!(messages[0].tool_name.as_deref(), Some("search"));
    }

    #[test]
    fn tool_name_match_is_exact() {
        let messages = classify(&RawLogEntry::tool_call("Code Interpreter", "x = 1"));
        assert_eq!(messages[0].text(), Some("x = 1"));
    }

    #[test]
    fn structured_arguments_render_as_json() {
        let messages = classify(&RawLogEntry::tool_call(
            "image_generator",
            json!({"prompt": "a cat"}),
        ));
        assert_eq!(messages[0].text(), Some(r#"{"prompt":"a cat"}"#));
    }

    #[test]
    fn all_fields_in_fixed_order() {
        let entry = RawLogEntry::default()
            .with_error("Tool search failed")
            .with_observation("no results")
            .with_tool_call("search", "weather")
            .with_rationale("Let me look it up");

        let messages = classify(&entry);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].text(), Some("Let me look it up"));
        assert_eq!(messages[1].tool_name.as_deref(), Some("search"));
        assert_eq!(messages[2].text(), Some("no results"));
        assert_eq!(messages[3].text(), Some("Tool search failed"));
        assert!(messages[3].is_error);
        assert!(messages.iter().all(|m| m.is_intermediate));
        assert!(messages[..3].iter().all(|m| !m.is_error));
    }

    #[test]
    fn empty_and_blank_entries_yield_nothing() {
        assert!(classify(&RawLogEntry::default()).is_empty());
        assert!(classify(&RawLogEntry::rationale("")).is_empty());
        assert!(classify(&RawLogEntry::observation("")).is_empty());
    }

    #[test]
    fn structured_error_uses_message() {
        let messages = classify(&RawLogEntry::error(json!({
            "type": "AgentParsingError",
            "message": "Could not parse the output"
        })));
        assert_eq!(messages[0].text(), Some("Could not parse the output"));
        assert!(messages[0].is_error);
    }

    #[test]
    fn classify_all_preserves_entry_order() {
        let entries = vec![
            RawLogEntry::rationale("first"),
            RawLogEntry::default(),
            RawLogEntry::observation("second").with_error("third"),
        ];
        let texts: Vec<_> = classify_all(&entries)
            .into_iter()
            .filter_map(|m| m.text().map(str::to_string))
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
