//! Sanitize-then-parse for JSON produced by a chat model.
//!
//! Models are asked for bare JSON but regularly wrap it in code fences, add
//! comments, or put a sentence in front of it.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::{EnhanceError, Enhancement};

static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)```[a-z]*\s*|\s*```").expect("Code fence regex is valid")
    })
}

/// Remove `//` line comments and `/* */` block comments outside of strings.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Strip code fences and comments from raw model output.
pub fn sanitize_llm_json(raw: &str) -> String {
    let unfenced = fence_regex().replace_all(raw, "");
    strip_comments(&unfenced).trim().to_string()
}

/// Parse model output as JSON after sanitizing it.
///
/// When the whole text is not JSON, the outermost `{ ... }` span is tried.
pub fn parse_llm_json(raw: &str) -> Result<Value, EnhanceError> {
    let sanitized = sanitize_llm_json(raw);

    match serde_json::from_str::<Value>(&sanitized) {
        Ok(value) => Ok(value),
        Err(e) => {
            let span = sanitized
                .find('{')
                .zip(sanitized.rfind('}'))
                .filter(|(start, end)| start < end)
                .map(|(start, end)| &sanitized[start..=end]);

            match span {
                Some(object) if object.len() < sanitized.len() => {
                    serde_json::from_str(object).map_err(|e| EnhanceError::Parse(e.to_string()))
                }
                _ => Err(EnhanceError::Parse(e.to_string())),
            }
        }
    }
}

/// Turn raw model output into an [`Enhancement`].
pub fn parse_enhancement(raw: &str) -> Result<Enhancement, EnhanceError> {
    let value = parse_llm_json(raw)?;

    let prompt = value
        .get("prompt")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(EnhanceError::InvalidShape)?;

    let aspect_ratio = value
        .get("aspect_ratio")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from);

    Ok(Enhancement {
        prompt: prompt.to_string(),
        aspect_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json() {
        let out = parse_enhancement(r#"{"prompt": "a red fox in snow", "aspect_ratio": "16:9"}"#).unwrap();
        assert_eq!(out.prompt, "a red fox in snow");
        assert_eq!(out.aspect_ratio.as_deref(), Some("16:9"));
    }

    #[test]
    fn test_code_fenced_json() {
        let raw = "```json\n{\"prompt\": \"a fox\", \"aspect_ratio\": null}\n```";
        let out = parse_enhancement(raw).unwrap();
        assert_eq!(out.prompt, "a fox");
        assert_eq!(out.aspect_ratio, None);

        let raw = "```\n{\"prompt\": \"a fox\"}\n```";
        assert_eq!(parse_enhancement(raw).unwrap().prompt, "a fox");
    }

    #[test]
    fn test_comments_are_removed() {
        let raw = r#"{
            // the enhanced prompt
            "prompt": "neon sign reading \"OPEN // 24h\" at http://example.com", /* keep */
            "aspect_ratio": "3:2"
        }"#;
        let out = parse_enhancement(raw).unwrap();
        assert_eq!(out.prompt, r#"neon sign reading "OPEN // 24h" at http://example.com"#);
        assert_eq!(out.aspect_ratio.as_deref(), Some("3:2"));
    }

    #[test]
    fn test_leading_prose_is_tolerated() {
        let raw = "Sure! Here is your prompt:\n{\"prompt\": \"a quiet harbour\", \"aspect_ratio\": \"3:2\"}";
        assert_eq!(parse_enhancement(raw).unwrap().prompt, "a quiet harbour");
    }

    #[test]
    fn test_non_json_is_a_parse_error() {
        assert!(matches!(parse_enhancement("I cannot help with that."), Err(EnhanceError::Parse(_))));
        assert!(matches!(parse_enhancement("{\"prompt\": "), Err(EnhanceError::Parse(_))));
        assert!(matches!(parse_enhancement(""), Err(EnhanceError::Parse(_))));
    }

    #[test]
    fn test_missing_prompt_is_invalid_shape() {
        assert_eq!(parse_enhancement(r#"{"aspect_ratio": "1:1"}"#), Err(EnhanceError::InvalidShape));
        assert_eq!(parse_enhancement(r#"{"prompt": 42}"#), Err(EnhanceError::InvalidShape));
        assert_eq!(parse_enhancement(r#"{"prompt": ""}"#), Err(EnhanceError::InvalidShape));
        assert_eq!(parse_enhancement(r#"["prompt"]"#), Err(EnhanceError::InvalidShape));
    }

    #[test]
    fn test_non_string_ratio_is_dropped() {
        let out = parse_enhancement(r#"{"prompt": "a fox", "aspect_ratio": 1.5}"#).unwrap();
        assert_eq!(out.aspect_ratio, None);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_llm_json("```json\n{}\n```"), "{}");
        assert_eq!(sanitize_llm_json("{} // trailing"), "{}");
        assert_eq!(sanitize_llm_json("/* lead */ {}"), "{}");
        assert_eq!(sanitize_llm_json(r#"{"a": "b//c"}"#), r#"{"a": "b//c"}"#);
    }
}
