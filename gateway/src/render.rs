//! Markdown content of the assistant reply.

use crate::pipeline::{EnhancementStatus, ResolvedRequest};

const ALT_TEXT_CHARS: usize = 80;

/// First 80 characters of the prompt, safe to put inside `![...]`.
fn alt_text(prompt: &str) -> String {
    let alt: String = prompt
        .chars()
        .take(ALT_TEXT_CHARS)
        .map(|c| match c {
            '[' | ']' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect();
    let alt = alt.trim();
    if alt.is_empty() {
        "Generated image".to_string()
    } else {
        alt.to_string()
    }
}

/// Render the image plus how the prompt and size were decided.
pub fn render_content(resolved: &ResolvedRequest, image_url: &str) -> String {
    let mut content = format!("![{}]({})\n\n---\n", alt_text(&resolved.final_prompt), image_url);

    match resolved.enhancement {
        EnhancementStatus::Used => {
            content.push_str(&format!("**✨ Enhanced Prompt:**\n{}\n\n", resolved.final_prompt));
            content.push_str(&format!("**📝 Original Input:**\n{}\n\n", resolved.cleaned_prompt));
        }
        EnhancementStatus::Failed(_) => {
            content.push_str("**⚠️ Enhancement failed, using original prompt**\n\n");
            content.push_str(&format!("**📝 Prompt:**\n{}\n\n", resolved.cleaned_prompt));
        }
        EnhancementStatus::Skipped => {
            content.push_str(&format!("**📝 Prompt:**\n{}\n\n", resolved.cleaned_prompt));
        }
    }

    content.push_str(&format!("**🎨 Aspect Ratio:** {}\n", resolved.final_ratio));
    content.push_str(&format!("**📐 Resolution:** {}×{}", resolved.width, resolved.height));

    content
}
