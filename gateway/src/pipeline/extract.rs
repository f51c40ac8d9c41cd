//! Prompt extraction from loosely-shaped chat requests.

use std::sync::OnceLock;

use regex::Regex;
use zimage_common::{ChatCompletionRequest, ContentPart, MessageContent};

static NO_ENHANCE_REGEX: OnceLock<Regex> = OnceLock::new();

fn no_enhance_regex() -> &'static Regex {
    NO_ENHANCE_REGEX
        .get_or_init(|| Regex::new(r"(?i)\s*no-enhance\s*").expect("No-enhance regex is valid"))
}

/// Pull the image prompt out of a request.
///
/// A non-blank `prompt` field wins and is returned trimmed. Otherwise the last
/// `user` message is used: string content is returned as-is, multi-part content
/// is joined with single spaces and trimmed. Returns `None` when nothing usable
/// is found.
pub fn extract_prompt(body: &ChatCompletionRequest) -> Option<String> {
    if let Some(prompt) = body.prompt.as_deref() {
        let trimmed = prompt.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    let last_user = body.messages.as_ref()?.iter().rev().find(|m| m.is_user())?;

    let prompt = match last_user.content.as_ref()? {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => parts
            .iter()
            .map(part_text)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string(),
    };

    Some(prompt).filter(|p| !p.is_empty())
}

fn part_text(part: &ContentPart) -> &str {
    part.text
        .as_deref()
        .or(part.content.as_deref())
        .unwrap_or("")
}

/// Detect and remove the `no-enhance` opt-out marker.
///
/// Returns the prompt with every marker removed and whether enhancement
/// should still run.
pub fn take_no_enhance_marker(prompt: &str) -> (String, bool) {
    let re = no_enhance_regex();
    if !re.is_match(prompt) {
        return (prompt.trim().to_string(), true);
    }
    let cleaned = re.replace_all(prompt, " ").trim().to_string();
    (cleaned, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zimage_common::ChatMessage;

    fn parse(json: &str) -> ChatCompletionRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_direct_prompt_is_trimmed() {
        let body = parse(r#"{"prompt": "  hi  "}"#);
        assert_eq!(extract_prompt(&body), Some("hi".to_string()));
    }

    #[test]
    fn test_direct_prompt_wins_over_messages() {
        let body = parse(r#"{"prompt": "direct", "messages": [{"role": "user", "content": "chat"}]}"#);
        assert_eq!(extract_prompt(&body), Some("direct".to_string()));
    }

    #[test]
    fn test_blank_prompt_falls_back_to_messages() {
        let body = parse(r#"{"prompt": "   ", "messages": [{"role": "user", "content": "chat"}]}"#);
        assert_eq!(extract_prompt(&body), Some("chat".to_string()));
    }

    #[test]
    fn test_last_user_message_is_used() {
        let body = ChatCompletionRequest {
            messages: Some(vec![
                ChatMessage::user("first"),
                ChatMessage {
                    role: Some("assistant".to_string()),
                    content: Some(MessageContent::Text("reply".to_string())),
                },
                ChatMessage::user("second"),
                ChatMessage {
                    role: Some("system".to_string()),
                    content: Some(MessageContent::Text("ignored".to_string())),
                },
            ]),
            ..Default::default()
        };
        assert_eq!(extract_prompt(&body), Some("second".to_string()));
    }

    #[test]
    fn test_string_content_is_not_trimmed() {
        let body = ChatCompletionRequest {
            messages: Some(vec![ChatMessage::user(" a cat ")]),
            ..Default::default()
        };
        assert_eq!(extract_prompt(&body), Some(" a cat ".to_string()));
    }

    #[test]
    fn test_content_parts_are_joined() {
        let body = parse(r#"{"messages": [{"role": "user", "content": [{"text": "a"}, {"content": "b"}]}]}"#);
        assert_eq!(extract_prompt(&body), Some("a b".to_string()));
    }

    #[test]
    fn test_content_parts_without_text_contribute_empty() {
        let body = parse(
            r#"{"messages": [{"role": "user", "content": [{"type": "image_url"}, {"text": "sunset"}]}]}"#,
        );
        assert_eq!(extract_prompt(&body), Some("sunset".to_string()));
    }

    #[test]
    fn test_non_object_parts_do_not_hide_text() {
        let body = parse(
            r#"{"messages": [{"role": "user", "content": ["x", null, {"text": "a lighthouse"}]}]}"#,
        );
        assert_eq!(extract_prompt(&body), Some("a lighthouse".to_string()));
    }

    #[test]
    fn test_stray_message_entries_are_skipped() {
        let body = parse(r#"{"messages": ["stray", {"role": "user", "content": "a lighthouse"}]}"#);
        assert_eq!(extract_prompt(&body), Some("a lighthouse".to_string()));
    }

    #[test]
    fn test_no_prompt_found() {
        assert_eq!(extract_prompt(&parse("{}")), None);
        assert_eq!(
            extract_prompt(&parse(r#"{"messages": [{"role": "assistant", "content": "x"}]}"#)),
            None
        );
        assert_eq!(extract_prompt(&parse(r#"{"messages": [{"role": "user"}]}"#)), None);
        assert_eq!(
            extract_prompt(&parse(r#"{"messages": [{"role": "user", "content": ""}]}"#)),
            None
        );
    }

    #[test]
    fn test_no_enhance_marker_removed() {
        let (cleaned, enhance) = take_no_enhance_marker("a castle at dusk no-enhance");
        assert_eq!(cleaned, "a castle at dusk");
        assert!(!enhance);

        let (cleaned, enhance) = take_no_enhance_marker("NO-ENHANCE a castle");
        assert_eq!(cleaned, "a castle");
        assert!(!enhance);

        let (cleaned, _) = take_no_enhance_marker("a no-enhance castle");
        assert_eq!(cleaned, "a castle");
    }

    #[test]
    fn test_without_marker_enhancement_runs() {
        let (cleaned, enhance) = take_no_enhance_marker("  a castle  ");
        assert_eq!(cleaned, "a castle");
        assert!(enhance);
    }
}
