//! Seeds module.
//!
//! A seed produces the argument list for a build step. It is either a
//! fixed list or a function of the generator. Seeds are immutable once
//! created and are only ever composed into larger argument lists.

use crate::args::Args;
use crate::error::FactoryError;
use crate::generator::Capabilities;
use serde_json::Value;
use std::sync::Arc;

/// Signature of a generator-backed seed.
pub type SeedFn<G> = dyn Fn(&G) -> Args + Send + Sync;

/// Source of constructor arguments.
///
/// # Examples
///
/// ```rust
/// use dashing::{args, Capabilities, Seed};
///
/// let generator = Capabilities::new();
///
/// let fixed: Seed = Seed::fixed(args!["batman", "robin"]);
/// assert_eq!(fixed.generate(&generator), args!["batman", "robin"]);
///
/// let dynamic: Seed = Seed::dynamic(|g: &Capabilities| {
///     let city = g.get::<String>("city").unwrap_or_else(|| "gotham".to_string());
///     dashing::args![_, city]
/// });
/// assert_eq!(dynamic.generate(&generator), args![_, "gotham"]);
/// ```
pub enum Seed<G = Capabilities> {
    /// A fixed argument list, copied on every evaluation.
    Fixed(Args),
    /// Arguments computed from the generator on every evaluation.
    Dynamic(Arc<SeedFn<G>>),
}

impl<G> Seed<G> {
    /// Create a seed from a fixed argument list.
    pub fn fixed(args: impl Into<Args>) -> Self {
        Seed::Fixed(args.into())
    }

    /// Create a seed computed from the generator.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&G) -> Args + Send + Sync + 'static,
    {
        Seed::Dynamic(Arc::new(f))
    }

    /// A seed that contributes nothing.
    pub fn empty() -> Self {
        Seed::Fixed(Args::new())
    }

    /// Evaluate the seed.
    ///
    /// Fixed seeds return a fresh copy, so callers may mutate the result
    /// without affecting later evaluations.
    pub fn generate(&self, generator: &G) -> Args {
        match self {
            Seed::Fixed(args) => args.clone(),
            Seed::Dynamic(f) => f(generator),
        }
    }
}

impl<G> Clone for Seed<G> {
    fn clone(&self) -> Self {
        match self {
            Seed::Fixed(args) => Seed::Fixed(args.clone()),
            Seed::Dynamic(f) => Seed::Dynamic(Arc::clone(f)),
        }
    }
}

impl<G> Default for Seed<G> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<G> std::fmt::Debug for Seed<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seed::Fixed(args) => f.debug_tuple("Fixed").field(args).finish(),
            Seed::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl<G> From<Args> for Seed<G> {
    fn from(args: Args) -> Self {
        Seed::Fixed(args)
    }
}

impl<G> TryFrom<Value> for Seed<G> {
    type Error = FactoryError;

    /// Only JSON arrays are accepted; every element becomes a set slot.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => Ok(Seed::Fixed(Args::from(values))),
            other => Err(FactoryError::InvalidSeed(json_kind(&other).to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use serde_json::json;

    #[test]
    fn test_fixed_seed_returns_independent_copies() {
        let seed: Seed = Seed::fixed(args!["batman", "robin"]);
        let generator = Capabilities::new();

        let mut first = seed.generate(&generator);
        let second = seed.generate(&generator);
        assert_eq!(first, second);

        first.set(0, "joker");
        assert_eq!(seed.generate(&generator), args!["batman", "robin"]);
    }

    #[test]
    fn test_dynamic_seed_reads_generator() {
        let seed: Seed = Seed::dynamic(|g: &Capabilities| {
            let mut args = Args::new();
            args.push(g.get::<u32>("age").unwrap_or(0));
            args
        });

        let mut generator = Capabilities::new();
        assert_eq!(seed.generate(&generator), args![0]);

        generator.set("age", 41);
        assert_eq!(seed.generate(&generator), args![41]);
    }

    #[test]
    fn test_empty_seed() {
        let seed: Seed = Seed::empty();
        assert!(seed.generate(&Capabilities::new()).is_empty());
    }

    #[test]
    fn test_try_from_array() {
        let seed = Seed::<Capabilities>::try_from(json!(["batman", null])).unwrap();
        assert_eq!(seed.generate(&Capabilities::new()), args!["batman", null]);
    }

    #[test]
    fn test_try_from_non_array_fails() {
        for (value, kind) in [
            (json!(null), "null"),
            (json!(42), "number"),
            (json!("batman"), "string"),
            (json!({ "name": "batman" }), "object"),
        ] {
            let err = Seed::<Capabilities>::try_from(value).unwrap_err();
            assert_eq!(err, FactoryError::InvalidSeed(kind.to_string()));
        }
    }

    #[test]
    fn test_debug_hides_closure() {
        let seed: Seed = Seed::dynamic(|_: &Capabilities| Args::new());
        assert_eq!(format!("{:?}", seed), "Dynamic(<fn>)");
    }
}
