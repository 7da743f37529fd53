//! Seed composition.
//!
//! Combines argument lists slot by slot. A set slot in the higher-priority
//! list wins, an unset slot falls through to the lower-priority list, and
//! slots past the end of the shorter list come from the longer one. With
//! [`MergeStrategy::Deep`], two JSON objects (or two JSON arrays) in the
//! same slot are merged recursively under the same rule instead of being
//! replaced.

use crate::args::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How two values in the same slot are combined.
///
/// # Examples
///
/// ```rust
/// use dashing::{args, MergeStrategy};
/// use dashing::merge::merge_args;
///
/// let lower = args![{ "name": "bruce", "city": "gotham" }];
/// let higher = args![{ "name": "dick" }];
///
/// let deep = merge_args(lower.clone(), higher.clone(), MergeStrategy::Deep);
/// assert_eq!(deep, args![{ "name": "dick", "city": "gotham" }]);
///
/// let shallow = merge_args(lower, higher, MergeStrategy::Shallow);
/// assert_eq!(shallow, args![{ "name": "dick" }]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Objects and arrays are merged field by field, recursively.
    #[default]
    Deep,
    /// A set slot replaces the lower value wholesale.
    Shallow,
}

/// Merge `higher` over `lower`.
///
/// The result has `max(lower.len(), higher.len())` slots.
pub fn merge_args(lower: Args, higher: Args, strategy: MergeStrategy) -> Args {
    let mut lower = lower.into_slots().into_iter();
    let mut higher = higher.into_slots().into_iter();
    let mut merged = Vec::with_capacity(lower.len().max(higher.len()));

    loop {
        let slot = match (lower.next(), higher.next()) {
            (None, None) => break,
            (Some(low), None) => low,
            (None, Some(high)) => high,
            (Some(low), Some(high)) => merge_slot(low, high, strategy),
        };
        merged.push(slot);
    }

    Args::from_slots(merged)
}

/// Fold [`merge_args`] left to right over `seeds`, starting from an empty list.
///
/// Later seeds take precedence. Composing nothing yields an empty list.
pub fn compose<I>(seeds: I, strategy: MergeStrategy) -> Args
where
    I: IntoIterator<Item = Args>,
{
    seeds
        .into_iter()
        .fold(Args::new(), |acc, seed| merge_args(acc, seed, strategy))
}

fn merge_slot(low: Option<Value>, high: Option<Value>, strategy: MergeStrategy) -> Option<Value> {
    match (low, high) {
        (low, None) => low,
        (Some(low), Some(high)) if strategy == MergeStrategy::Deep => {
            Some(deep_merge(low, high))
        }
        (_, high) => high,
    }
}

/// Recursively merge `high` into `low`.
///
/// Objects merge key by key, arrays merge index by index, and any other
/// pairing takes `high`.
pub fn deep_merge(low: Value, high: Value) -> Value {
    match (low, high) {
        (Value::Object(mut low), Value::Object(high)) => {
            for (key, high_value) in high {
                let merged = match low.remove(&key) {
                    Some(low_value) => deep_merge(low_value, high_value),
                    None => high_value,
                };
                low.insert(key, merged);
            }
            Value::Object(low)
        }
        (Value::Array(low), Value::Array(high)) => {
            let mut low = low.into_iter();
            let mut high = high.into_iter();
            let mut merged = Vec::new();
            loop {
                match (low.next(), high.next()) {
                    (None, None) => break,
                    (Some(l), None) => merged.push(l),
                    (None, Some(h)) => merged.push(h),
                    (Some(l), Some(h)) => merged.push(deep_merge(l, h)),
                }
            }
            Value::Array(merged)
        }
        (_, high) => high,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use serde_json::json;

    #[test]
    fn test_defined_wins_unset_falls_through() {
        let merged = merge_args(args!["a0", "a1"], args![_, "b1"], MergeStrategy::Deep);
        assert_eq!(merged, args!["a0", "b1"]);
    }

    #[test]
    fn test_shorter_higher_keeps_tail() {
        let merged = merge_args(
            args!["batman", "robin", "alfred"],
            args![_, "joker"],
            MergeStrategy::Deep,
        );
        assert_eq!(merged, args!["batman", "joker", "alfred"]);
    }

    #[test]
    fn test_longer_higher_extends() {
        let merged = merge_args(args!["batman"], args![_, "robin", _], MergeStrategy::Deep);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(0), Some(&json!("batman")));
        assert_eq!(merged.get(1), Some(&json!("robin")));
        assert!(!merged.is_set(2));
    }

    #[test]
    fn test_null_overrides() {
        let merged = merge_args(args!["batman"], args![null], MergeStrategy::Deep);
        assert_eq!(merged, args![null]);
    }

    #[test]
    fn test_falsy_values_override() {
        let merged = merge_args(args![1, true, "x"], args![0, false, ""], MergeStrategy::Deep);
        assert_eq!(merged, args![0, false, ""]);
    }

    #[test]
    fn test_deep_merge_nested_objects() {
        let merged = merge_args(
            args![{ "hero": { "name": "bruce", "age": 40 }, "city": "gotham" }],
            args![{ "hero": { "age": 41 } }],
            MergeStrategy::Deep,
        );
        assert_eq!(
            merged,
            args![{ "hero": { "name": "bruce", "age": 41 }, "city": "gotham" }]
        );
    }

    #[test]
    fn test_deep_merge_arrays_by_index() {
        let merged = deep_merge(json!([1, { "a": 1 }, 3]), json!([9, { "b": 2 }]));
        assert_eq!(merged, json!([9, { "a": 1, "b": 2 }, 3]));
    }

    #[test]
    fn test_mismatched_kinds_take_higher() {
        assert_eq!(deep_merge(json!({ "a": 1 }), json!("flat")), json!("flat"));
        assert_eq!(deep_merge(json!([1]), json!({ "a": 1 })), json!({ "a": 1 }));
    }

    #[test]
    fn test_compose_empty_is_empty() {
        let composed = compose(Vec::new(), MergeStrategy::Deep);
        assert!(composed.is_empty());
    }

    #[test]
    fn test_compose_is_ordered() {
        let composed = compose(
            vec![
                args!["batman", "robin"],
                args![_, "joker"],
                args!["twoface", "scarecrow"],
            ],
            MergeStrategy::Deep,
        );
        assert_eq!(composed, args!["twoface", "scarecrow"]);
    }

    #[test]
    fn test_compose_is_associative() {
        let a = args!["a", { "x": 1 }, _];
        let b = args![_, { "y": 2 }, "b"];
        let c = args!["c", { "x": 3 }];

        let left = merge_args(
            merge_args(a.clone(), b.clone(), MergeStrategy::Deep),
            c.clone(),
            MergeStrategy::Deep,
        );
        let right = merge_args(a, merge_args(b, c, MergeStrategy::Deep), MergeStrategy::Deep);
        assert_eq!(left, right);
    }

    #[test]
    fn test_strategy_serde() {
        assert_eq!(serde_json::to_string(&MergeStrategy::Shallow).unwrap(), "\"shallow\"");
        let strategy: MergeStrategy = serde_json::from_str("\"deep\"").unwrap();
        assert_eq!(strategy, MergeStrategy::Deep);
    }
}
