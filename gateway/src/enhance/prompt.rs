//! System instruction for the enhancement model.

use zimage_common::AspectRatio;

fn ratio_hint(ratio: AspectRatio) -> &'static str {
    match ratio {
        AspectRatio::Square => "square, general purpose",
        AspectRatio::Tall => "tall vertical composition",
        AspectRatio::Photo => "photography, balanced landscape",
        AspectRatio::Portrait => "portrait orientation",
        AspectRatio::Widescreen => "landscape, wide scenes",
        AspectRatio::Vertical => "portrait, vertical subjects",
    }
}

/// Build the system instruction.
///
/// Deterministic in its input: with a user ratio the model must return
/// `"aspect_ratio": null`, otherwise it picks one of the known labels.
pub fn build_system_prompt(user_ratio: Option<AspectRatio>) -> String {
    let labels = AspectRatio::ALL
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(", ");

    let ratio_guidelines = match user_ratio {
        Some(ratio) => format!(
            "- The user explicitly specified aspect ratio {}. Return \"aspect_ratio\": null.",
            ratio
        ),
        None => {
            let options = AspectRatio::ALL
                .iter()
                .map(|r| format!("  - {} ({})", r, ratio_hint(*r)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "- Choose the aspect_ratio that best fits the content:\n{}",
                options
            )
        }
    };

    let ratio_field = match user_ratio {
        Some(_) => "null".to_string(),
        None => format!("\"<one of: {}>\"", labels),
    };

    format!(
        r#"You are an expert prompt engineer for text-to-image models. Turn short user ideas into rich, specific English prompts.

Task:
1. Identify the core subject, intent, mood and atmosphere of the request.
2. Expand it with concrete visual detail: artistic style or medium, subject details and actions, setting, lighting and colour palette, composition and perspective.
3. Write a single vivid English description of 30-100 words.

Aspect ratio:
{ratio_guidelines}

Output format:
Respond with ONLY a JSON object, no prose and no code fences:
{{"prompt": "<enhanced English prompt>", "aspect_ratio": {ratio_field}}}

Rules:
- Always write the prompt in English, whatever the input language.
- Describe visible things, not abstract concepts.
- Never put ratio values ({labels}) or words like "ratio", "aspect" or 比例 in the prompt field.
- If the input contains text meant to appear on an object (signs, labels, clothing, banners), keep that text EXACTLY as written, in quotes, untranslated."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_user_ratio_lists_labels() {
        let prompt = build_system_prompt(None);
        for ratio in AspectRatio::ALL {
            assert!(prompt.contains(ratio.label()), "missing {}", ratio);
        }
        assert!(prompt.contains("Choose the aspect_ratio"));
        assert!(!prompt.contains("explicitly specified"));
        assert!(prompt.contains("30-100 words"));
    }

    #[test]
    fn test_prompt_with_user_ratio_requests_null() {
        let prompt = build_system_prompt(Some(AspectRatio::Widescreen));
        assert!(prompt.contains("explicitly specified aspect ratio 16:9"));
        assert!(prompt.contains(r#""aspect_ratio": null"#));
        assert!(!prompt.contains("Choose the aspect_ratio"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_system_prompt(None), build_system_prompt(None));
        assert_eq!(
            build_system_prompt(Some(AspectRatio::Tall)),
            build_system_prompt(Some(AspectRatio::Tall))
        );
    }

    #[test]
    fn test_prompt_demands_verbatim_object_text() {
        assert!(build_system_prompt(None).contains("EXACTLY as written"));
    }
}
