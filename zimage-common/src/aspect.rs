//! Aspect ratio labels understood by the image backend.

use serde::{Deserialize, Serialize};

/// One of the fixed aspect ratios the gateway can request.
///
/// Every ratio maps to a canonical pixel size whose longest side is 2048 and
/// whose dimensions are both multiples of 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "1:2")]
    Tall,
    #[serde(rename = "3:2")]
    Photo,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Vertical,
}

impl AspectRatio {
    /// All ratios, in the order prompts are scanned for them.
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Square,
        AspectRatio::Tall,
        AspectRatio::Photo,
        AspectRatio::Portrait,
        AspectRatio::Widescreen,
        AspectRatio::Vertical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Tall => "1:2",
            AspectRatio::Photo => "3:2",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Vertical => "9:16",
        }
    }

    /// Canonical `(width, height)` for this ratio.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (2048, 2048),
            AspectRatio::Tall => (1024, 2048),
            AspectRatio::Photo => (1920, 1280),
            AspectRatio::Portrait => (1536, 2048),
            AspectRatio::Widescreen => (2048, 1152),
            AspectRatio::Vertical => (1152, 2048),
        }
    }

    /// Look up a ratio by its exact label, e.g. `"16:9"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sizes() {
        for ratio in AspectRatio::ALL {
            let (w, h) = ratio.dimensions();
            assert_eq!(w % 64, 0, "{} width", ratio);
            assert_eq!(h % 64, 0, "{} height", ratio);
            assert_eq!(w.max(h), 2048, "{} longest side", ratio);
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(AspectRatio::from_label("16:9"), Some(AspectRatio::Widescreen));
        assert_eq!(AspectRatio::from_label("9:16"), Some(AspectRatio::Vertical));
        assert_eq!(AspectRatio::from_label("4:3"), None);
        assert_eq!(AspectRatio::from_label(""), None);
    }

    #[test]
    fn test_serialization_uses_label() {
        let json = serde_json::to_string(&AspectRatio::Portrait).unwrap();
        assert_eq!(json, r#""3:4""#);

        let parsed: AspectRatio = serde_json::from_str(r#""1:2""#).unwrap();
        assert_eq!(parsed, AspectRatio::Tall);
    }

    #[test]
    fn test_default_is_square() {
        assert_eq!(AspectRatio::default(), AspectRatio::Square);
        assert_eq!(AspectRatio::default().dimensions(), (2048, 2048));
    }
}
