//! Constructor arguments.
//!
//! `Args` is the positional argument list a builder hands to its target
//! constructor. Each slot is either a JSON value or *unset*. Unset is not
//! the same as JSON `null`: an unset slot in a higher-priority seed means
//! "no override, keep the lower value", while `null` is a real value that
//! wins like any other.

use crate::error::{FactoryError, FactoryResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Positional argument list with an explicit unset marker per slot.
///
/// # Examples
///
/// ```rust
/// use dashing::{args, Args};
///
/// let args = args!["batman", _, null];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.value::<String>(0), Some("batman".to_string()));
/// assert!(!args.is_set(1));
/// assert!(args.is_set(2)); // null is a real value
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Option<Value>>);

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an argument list from raw slots (`None` = unset).
    pub fn from_slots(slots: Vec<Option<Value>>) -> Self {
        Self(slots)
    }

    /// Number of slots, set or not.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value at `index`, or `None` when the slot is unset or missing.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Whether the slot at `index` holds a value.
    pub fn is_set(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Deserialize the value at `index`.
    ///
    /// Returns `None` if the slot is unset or the value cannot be
    /// deserialized to the requested type.
    pub fn value<T: DeserializeOwned>(&self, index: usize) -> Option<T> {
        self.get(index)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Deserialize the value at `index`, failing if it is unset or malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashing::{args, FactoryError};
    ///
    /// let args = args!["alfred", _];
    /// assert_eq!(args.require::<String>(0).unwrap(), "alfred");
    /// assert_eq!(
    ///     args.require::<String>(1),
    ///     Err(FactoryError::MissingArgument { index: 1 })
    /// );
    /// ```
    pub fn require<T: DeserializeOwned>(&self, index: usize) -> FactoryResult<T> {
        let value = self
            .get(index)
            .ok_or(FactoryError::MissingArgument { index })?;
        serde_json::from_value(value.clone()).map_err(|e| FactoryError::InvalidArgument {
            index,
            message: e.to_string(),
        })
    }

    /// Append a value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(Some(value.into()));
    }

    /// Append any serializable value.
    ///
    /// Fails with [`FactoryError::InvalidArgument`] when the value has no
    /// JSON form (a map with non-string keys, for one). Nothing is appended
    /// in that case.
    pub fn try_push(&mut self, value: impl Serialize) -> FactoryResult<()> {
        let value = to_slot(self.0.len(), value)?;
        self.0.push(Some(value));
        Ok(())
    }

    /// Append an unset slot.
    pub fn push_unset(&mut self) {
        self.0.push(None);
    }

    /// Set the slot at `index`, growing the list with unset slots if needed.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) {
        self.put(index, value.into());
    }

    /// Set the slot at `index` to any serializable value.
    ///
    /// Like [`Args::try_push`], a value without a JSON form is an error
    /// and leaves the list untouched.
    pub fn try_set(&mut self, index: usize, value: impl Serialize) -> FactoryResult<()> {
        let value = to_slot(index, value)?;
        self.put(index, value);
        Ok(())
    }

    fn put(&mut self, index: usize, value: Value) {
        if index >= self.0.len() {
            self.0.resize(index + 1, None);
        }
        self.0[index] = Some(value);
    }

    /// Iterate over the slots in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Value>> {
        self.0.iter().map(Option::as_ref)
    }

    /// Consume the list and return the raw slots.
    pub fn into_slots(self) -> Vec<Option<Value>> {
        self.0
    }
}

fn to_slot(index: usize, value: impl Serialize) -> FactoryResult<Value> {
    serde_json::to_value(value).map_err(|e| FactoryError::InvalidArgument {
        index,
        message: e.to_string(),
    })
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<Value>>> for Args {
    fn from(slots: Vec<Option<Value>>) -> Self {
        Self(slots)
    }
}

impl FromIterator<Option<Value>> for Args {
    fn from_iter<I: IntoIterator<Item = Option<Value>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Args {
    type Item = Option<Value>;
    type IntoIter = std::vec::IntoIter<Option<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Types that can be constructed from positional [`Args`].
///
/// Implementing this lets a type be built with [`Builder::of`](crate::Builder::of)
/// or defined in a [`Catalog`](crate::Catalog) without passing a closure.
pub trait FromArgs: Sized {
    /// Construct an instance from the composed arguments.
    fn from_args(args: &Args) -> FactoryResult<Self>;
}

/// Build an [`Args`] list.
///
/// `_` leaves a slot unset; any other token tree goes through
/// `serde_json::json!`. Wrap negative numbers and other multi-token
/// expressions in parentheses.
///
/// ```rust
/// use dashing::args;
///
/// let count = 3;
/// let args = args![_, "robin", (-1), (count * 2), { "cape": true }];
/// assert!(!args.is_set(0));
/// assert_eq!(args.value::<i64>(2), Some(-1));
/// assert_eq!(args.value::<i64>(3), Some(6));
/// ```
#[macro_export]
macro_rules! args {
    (@slot _) => {
        ::std::option::Option::None
    };
    (@slot $value:tt) => {
        ::std::option::Option::Some($crate::serde_json::json!($value))
    };
    () => {
        $crate::Args::new()
    };
    ($($slot:tt),+ $(,)?) => {
        $crate::Args::from_slots(::std::vec![$($crate::args!(@slot $slot)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_unset_differs_from_null() {
        let args = args![_, null];
        assert!(!args.is_set(0));
        assert!(args.is_set(1));
        assert_eq!(args.get(1), Some(&Value::Null));
    }

    #[test]
    fn test_value_wrong_type() {
        let args = args!["joker"];
        assert_eq!(args.value::<u32>(0), None);
        assert!(matches!(
            args.require::<u32>(0),
            Err(FactoryError::InvalidArgument { index: 0, .. })
        ));
    }

    #[test]
    fn test_out_of_range_is_missing() {
        let args = Args::new();
        assert_eq!(args.get(4), None);
        assert_eq!(
            args.require::<String>(4),
            Err(FactoryError::MissingArgument { index: 4 })
        );
    }

    #[test]
    fn test_set_grows_with_unset_slots() {
        let mut args = Args::new();
        args.set(2, "alfred");
        assert_eq!(args.len(), 3);
        assert!(!args.is_set(0));
        assert!(!args.is_set(1));
        assert_eq!(args.get(2), Some(&json!("alfred")));
    }

    #[test]
    fn test_push() {
        let mut args = Args::new();
        args.push(42);
        args.push_unset();
        args.push(vec![1, 2]);
        assert_eq!(
            args.into_slots(),
            vec![Some(json!(42)), None, Some(json!([1, 2]))]
        );
    }

    #[test]
    fn test_try_push_rejects_values_without_json_form() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys");

        let mut args = args![_];
        let err = args.try_push(&bad).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidArgument { index: 1, .. }));
        // Nothing was appended, in particular no unset slot.
        assert_eq!(args.len(), 1);

        let err = args.try_set(0, &bad).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidArgument { index: 0, .. }));
        assert!(!args.is_set(0));
    }

    #[test]
    fn test_try_push_serializable_struct() {
        #[derive(Serialize)]
        struct Gear {
            cape: bool,
        }

        let mut args = Args::new();
        args.try_push(Gear { cape: true }).unwrap();
        args.try_set(2, vec!["belt"]).unwrap();
        assert_eq!(
            args.into_slots(),
            vec![Some(json!({ "cape": true })), None, Some(json!(["belt"]))]
        );
    }

    #[test]
    fn test_from_values_are_all_set() {
        let args = Args::from(vec![json!("a"), json!(null)]);
        assert!(args.iter().all(|slot| slot.is_some()));
    }

    #[test]
    fn test_macro_with_variables_and_objects() {
        let name = "bruce";
        let args = args![name, { "city": "gotham" }, [1, 2],];
        assert_eq!(args.value::<String>(0), Some("bruce".to_string()));
        assert_eq!(args.get(1), Some(&json!({ "city": "gotham" })));
        assert_eq!(args.get(2), Some(&json!([1, 2])));
    }
}
