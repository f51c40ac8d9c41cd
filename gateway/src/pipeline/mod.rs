//! Request resolution pipeline.
//!
//! Turns a loosely-shaped chat request into the final image prompt, size and
//! generation parameters:
//!
//! 1. extract the prompt and drop the `no-enhance` marker
//! 2. look for an explicit ratio directive
//! 3. optionally enhance the prompt (failures fall back to the user's prompt)
//! 4. pick the ratio by [`RatioRule::PRIORITY`] and compute the size
//! 5. resolve seed, cfg and negative prompt

pub mod extract;
pub mod params;
pub mod ratio;
pub mod size;

pub use extract::{extract_prompt, take_no_enhance_marker};
pub use params::{explicit_seed, resolve_cfg, resolve_seed, FixedSeed, RandomSeed, SeedSource};
pub use ratio::{detect_aspect_from_prompt, strip_aspect_from_prompt};
pub use size::{explicit_size, resolve_ratio, resolve_size, FinalRatio, RatioInputs, RatioRule};

use zimage_common::{AspectRatio, ChatCompletionRequest, GenerationPayload};

use crate::config::ImageConfig;
use crate::enhance::{EnhanceError, PromptEnhancer};
use crate::error::{Error, Result};

/// What happened to prompt enhancement for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancementStatus {
    Used,
    Failed(EnhanceError),
    /// Opted out with the `no-enhance` marker.
    Skipped,
}

/// Fully resolved request, ready to become a generation payload.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub raw_prompt: String,
    /// Raw prompt without the `no-enhance` marker.
    pub cleaned_prompt: String,
    pub user_specified_ratio: Option<AspectRatio>,
    pub llm_suggested_ratio: Option<String>,
    pub final_prompt: String,
    pub final_ratio: FinalRatio,
    pub ratio_rule: RatioRule,
    pub width: u32,
    pub height: u32,
    pub cfg: f64,
    pub seed: i64,
    pub negative_prompt: Option<String>,
    pub enhancement: EnhancementStatus,
}

impl ResolvedRequest {
    pub fn to_payload(&self, image: &ImageConfig) -> GenerationPayload {
        GenerationPayload {
            prompt: self.final_prompt.clone(),
            width: self.width,
            height: self.height,
            steps: image.steps,
            cfg: self.cfg,
            model_index: image.model_index,
            seed: self.seed,
            negative_prompt: self.negative_prompt.clone(),
        }
    }
}

fn prompt_required() -> Error {
    Error::InvalidRequest("prompt is required (in prompt or messages)".to_string())
}

/// Run the resolution pipeline for one request.
///
/// Only a missing prompt is an error here; enhancement problems are recorded
/// in [`ResolvedRequest::enhancement`].
pub async fn resolve_request(
    body: &ChatCompletionRequest,
    enhancer: &dyn PromptEnhancer,
    seeds: &dyn SeedSource,
) -> Result<ResolvedRequest> {
    let raw_prompt = extract_prompt(body).ok_or_else(prompt_required)?;

    let (cleaned_prompt, should_enhance) = take_no_enhance_marker(&raw_prompt);
    if cleaned_prompt.is_empty() {
        return Err(prompt_required());
    }

    let user_specified_ratio = detect_aspect_from_prompt(&cleaned_prompt);

    let mut working_prompt = cleaned_prompt.clone();
    let mut llm_suggested_ratio = None;

    let enhancement = if should_enhance {
        match enhancer.enhance(&cleaned_prompt, user_specified_ratio).await {
            Ok(enhanced) => {
                working_prompt = enhanced.prompt;
                llm_suggested_ratio = enhanced.aspect_ratio;
                EnhancementStatus::Used
            }
            Err(e) => {
                tracing::warn!("LLM enhancement failed, using original prompt: {}", e);
                EnhancementStatus::Failed(e)
            }
        }
    } else {
        EnhancementStatus::Skipped
    };

    let inputs = RatioInputs {
        user_specified: user_specified_ratio,
        explicit_size: explicit_size(body),
        suggested: llm_suggested_ratio.as_deref(),
    };
    let (ratio_rule, final_ratio) = resolve_ratio(&inputs);

    let final_prompt = if ratio_rule == RatioRule::UserSpecified {
        let stripped = strip_aspect_from_prompt(&working_prompt, user_specified_ratio);
        // A prompt that was nothing but the directive keeps its text.
        if stripped.is_empty() {
            working_prompt
        } else {
            stripped
        }
    } else {
        working_prompt
    };

    let (width, height) = resolve_size(body, final_ratio.aspect());

    let resolved = ResolvedRequest {
        raw_prompt,
        cleaned_prompt,
        user_specified_ratio,
        llm_suggested_ratio,
        final_prompt,
        final_ratio,
        ratio_rule,
        width,
        height,
        cfg: resolve_cfg(body),
        seed: resolve_seed(body, seeds),
        negative_prompt: body.negative_prompt.clone().filter(|n| !n.is_empty()),
        enhancement,
    };

    tracing::debug!(
        ratio = %resolved.final_ratio,
        rule = ?resolved.ratio_rule,
        width = resolved.width,
        height = resolved.height,
        seed = resolved.seed,
        enhancement = ?resolved.enhancement,
        "Resolved generation request"
    );

    Ok(resolved)
}
