//! Final aspect ratio and pixel size resolution.

use zimage_common::{AspectRatio, ChatCompletionRequest};

const MIN_SIDE: f64 = 64.0;
const MAX_SIDE: f64 = 2048.0;
const ALIGNMENT: f64 = 8.0;

/// The ratio reported for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalRatio {
    Label(AspectRatio),
    /// Size came from explicit `width`/`height`.
    Custom,
}

impl FinalRatio {
    pub fn aspect(&self) -> Option<AspectRatio> {
        match self {
            FinalRatio::Label(ratio) => Some(*ratio),
            FinalRatio::Custom => None,
        }
    }
}

impl std::fmt::Display for FinalRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinalRatio::Label(ratio) => write!(f, "{}", ratio),
            FinalRatio::Custom => write!(f, "Custom"),
        }
    }
}

/// Everything the ratio rules look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioInputs<'a> {
    /// Ratio named in the prompt next to a trigger word.
    pub user_specified: Option<AspectRatio>,
    /// Numeric `width`/`height` from the request body.
    pub explicit_size: Option<(f64, f64)>,
    /// Raw suggestion returned by the enhancement model.
    pub suggested: Option<&'a str>,
}

/// Ratio rules, evaluated in [`RatioRule::PRIORITY`] order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioRule {
    UserSpecified,
    ExplicitSize,
    EnhancementSuggestion,
    Default,
}

impl RatioRule {
    pub const PRIORITY: [RatioRule; 4] = [
        RatioRule::UserSpecified,
        RatioRule::ExplicitSize,
        RatioRule::EnhancementSuggestion,
        RatioRule::Default,
    ];

    pub fn evaluate(&self, inputs: &RatioInputs<'_>) -> Option<FinalRatio> {
        match self {
            RatioRule::UserSpecified => inputs.user_specified.map(FinalRatio::Label),
            RatioRule::ExplicitSize => inputs.explicit_size.map(|_| FinalRatio::Custom),
            RatioRule::EnhancementSuggestion => inputs
                .suggested
                .and_then(AspectRatio::from_label)
                .map(FinalRatio::Label),
            RatioRule::Default => Some(FinalRatio::Label(AspectRatio::default())),
        }
    }
}

/// Pick the final ratio and the rule that produced it.
pub fn resolve_ratio(inputs: &RatioInputs<'_>) -> (RatioRule, FinalRatio) {
    RatioRule::PRIORITY
        .into_iter()
        .find_map(|rule| rule.evaluate(inputs).map(|ratio| (rule, ratio)))
        .unwrap_or((RatioRule::Default, FinalRatio::Label(AspectRatio::default())))
}

/// Positive, finite `width` and `height` from the body, if both are present.
pub fn explicit_size(body: &ChatCompletionRequest) -> Option<(f64, f64)> {
    let valid = |v: Option<f64>| v.filter(|n| n.is_finite() && *n > 0.0);
    Some((valid(body.width)?, valid(body.height)?))
}

/// Finite `width` and `height` from the body, whatever their sign.
fn body_size(body: &ChatCompletionRequest) -> Option<(f64, f64)> {
    let finite = |v: Option<f64>| v.filter(|n| n.is_finite());
    Some((finite(body.width)?, finite(body.height)?))
}

fn align(side: f64) -> u32 {
    ((side / ALIGNMENT).round() * ALIGNMENT).clamp(MIN_SIDE, MAX_SIDE) as u32
}

/// Final `(width, height)` for a request.
///
/// Numeric body dimensions win and are aligned to multiples of 8 within
/// `[64, 2048]`, so zero or negative sides clamp to 64. Otherwise the ratio's
/// canonical size, defaulting to 1:1.
pub fn resolve_size(body: &ChatCompletionRequest, ratio: Option<AspectRatio>) -> (u32, u32) {
    if let Some((width, height)) = body_size(body) {
        return (align(width), align(height));
    }
    ratio.unwrap_or_default().dimensions()
}
