//! Explicit aspect-ratio directives inside prompts.
//!
//! A ratio is only honoured when the prompt also contains a trigger word
//! ("ratio" or 比例), so prompts like "a 16:9 TV" are left alone.

use std::sync::OnceLock;

use regex::Regex;
use zimage_common::AspectRatio;

static TRIGGER_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static STRIP_REGEXES: OnceLock<Vec<(AspectRatio, Regex)>> = OnceLock::new();

fn trigger_regex() -> &'static Regex {
    TRIGGER_REGEX.get_or_init(|| Regex::new(r"(?i)(?:比例|ratio)").expect("Trigger regex is valid"))
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Whitespace regex is valid"))
}

/// Directive pattern for a ratio: optional leading comma/period, optional
/// trigger word, then the label itself.
fn strip_regex(ratio: AspectRatio) -> &'static Regex {
    let regexes = STRIP_REGEXES.get_or_init(|| {
        AspectRatio::ALL
            .into_iter()
            .map(|r| {
                let pattern = format!(
                    r"(?i)\s*[，,。]?\s*(?:比例|ratio)?\s*{}\s*",
                    regex::escape(r.label())
                );
                (r, Regex::new(&pattern).expect("Ratio strip regex is valid"))
            })
            .collect()
    });

    regexes
        .iter()
        .find(|(r, _)| *r == ratio)
        .map(|(_, re)| re)
        .expect("every ratio has a strip regex")
}

fn normalize_colons(prompt: &str) -> String {
    prompt.replace('：', ":")
}

/// Find an explicit ratio directive in the prompt.
///
/// Requires a trigger word; full-width colons count as ASCII colons. Ratios are
/// tested in [`AspectRatio::ALL`] order and the first one present wins.
pub fn detect_aspect_from_prompt(prompt: &str) -> Option<AspectRatio> {
    if !trigger_regex().is_match(prompt) {
        return None;
    }

    let normalized = normalize_colons(prompt);
    AspectRatio::ALL
        .into_iter()
        .find(|r| normalized.contains(r.label()))
}

/// Remove a detected ratio directive from the prompt.
///
/// Best effort: every occurrence of the label is removed together with an
/// adjacent trigger word and punctuation, then whitespace is collapsed.
pub fn strip_aspect_from_prompt(prompt: &str, ratio: Option<AspectRatio>) -> String {
    let Some(ratio) = ratio else {
        return prompt.to_string();
    };

    let normalized = normalize_colons(prompt);
    let stripped = strip_regex(ratio).replace_all(&normalized, " ");
    whitespace_regex().replace_all(&stripped, " ").trim().to_string()
}
