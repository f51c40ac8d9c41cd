//! Auxiliary generation parameters: seed, cfg and negative prompt.

use rand::Rng;
use serde_json::Value;
use zimage_common::ChatCompletionRequest;

/// Exclusive upper bound for generated seeds (31-bit, non-negative).
pub const MAX_SEED: u32 = 2_147_483_647;

pub const DEFAULT_CFG: f64 = 7.0;

/// Source of seeds for requests that don't pin one.
pub trait SeedSource: Send + Sync {
    /// Next seed in `[0, MAX_SEED)`.
    fn next_seed(&self) -> u32;
}

/// Uniformly random seeds from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSeed;

impl SeedSource for RandomSeed {
    fn next_seed(&self) -> u32 {
        rand::thread_rng().gen_range(0..MAX_SEED)
    }
}

/// Always returns the same seed.
#[derive(Debug, Clone, Copy)]
pub struct FixedSeed(pub u32);

impl SeedSource for FixedSeed {
    fn next_seed(&self) -> u32 {
        self.0
    }
}

/// Seed given by the client: a finite number or numeric string, floored.
pub fn explicit_seed(raw: Option<&Value>) -> Option<i64> {
    let value = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then(|| value.floor() as i64)
}

pub fn resolve_seed(body: &ChatCompletionRequest, seeds: &dyn SeedSource) -> i64 {
    explicit_seed(body.seed.as_ref()).unwrap_or_else(|| i64::from(seeds.next_seed()))
}

pub fn resolve_cfg(body: &ChatCompletionRequest) -> f64 {
    body.cfg.filter(|c| c.is_finite()).unwrap_or(DEFAULT_CFG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_seed_accepts_numbers_and_numeric_strings() {
        assert_eq!(explicit_seed(Some(&json!(42))), Some(42));
        assert_eq!(explicit_seed(Some(&json!(42.9))), Some(42));
        assert_eq!(explicit_seed(Some(&json!(-3.5))), Some(-4));
        assert_eq!(explicit_seed(Some(&json!("1234"))), Some(1234));
        assert_eq!(explicit_seed(Some(&json!(" 7 "))), Some(7));
    }

    #[test]
    fn test_invalid_seed_is_ignored() {
        assert_eq!(explicit_seed(None), None);
        assert_eq!(explicit_seed(Some(&Value::Null)), None);
        assert_eq!(explicit_seed(Some(&json!(""))), None);
        assert_eq!(explicit_seed(Some(&json!("abc"))), None);
        assert_eq!(explicit_seed(Some(&json!("inf"))), None);
        assert_eq!(explicit_seed(Some(&json!(true))), None);
        assert_eq!(explicit_seed(Some(&json!([1]))), None);
    }

    #[test]
    fn test_resolve_seed_falls_back_to_source() {
        let body = ChatCompletionRequest::default();
        assert_eq!(resolve_seed(&body, &FixedSeed(99)), 99);

        let body = ChatCompletionRequest {
            seed: Some(json!(5)),
            ..Default::default()
        };
        assert_eq!(resolve_seed(&body, &FixedSeed(99)), 5);
    }

    #[test]
    fn test_random_seed_range() {
        let source = RandomSeed;
        for _ in 0..1000 {
            assert!(source.next_seed() < MAX_SEED);
        }
    }

    #[test]
    fn test_resolve_cfg() {
        assert_eq!(resolve_cfg(&ChatCompletionRequest::default()), 7.0);
        let body = ChatCompletionRequest {
            cfg: Some(4.5),
            ..Default::default()
        };
        assert_eq!(resolve_cfg(&body), 4.5);
        let body = ChatCompletionRequest {
            cfg: Some(f64::INFINITY),
            ..Default::default()
        };
        assert_eq!(resolve_cfg(&body), 7.0);
    }
}
