//! Build results.
//!
//! A build produces a single instance unless more than one repetition
//! was requested, in which case it produces all of them in order.

/// The instances produced by one build.
///
/// # Examples
///
/// ```rust
/// use dashing::Made;
///
/// let one = Made::from_vec(vec!["batman"]);
/// assert_eq!(one, Made::One("batman"));
///
/// let many = Made::from_vec(vec!["batman", "robin"]);
/// assert!(many.is_many());
/// assert_eq!(many.into_vec(), vec!["batman", "robin"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Made<T> {
    /// Exactly one instance was built.
    One(T),
    /// Several instances were built (or none, for an undefined factory).
    Many(Vec<T>),
}

impl<T> Made<T> {
    /// Wrap built instances: a single one becomes [`Made::One`].
    pub fn from_vec(mut made: Vec<T>) -> Self {
        if made.len() == 1 {
            if let Some(one) = made.pop() {
                return Made::One(one);
            }
        }
        Made::Many(made)
    }

    /// The single instance, or `None` if this is [`Made::Many`].
    pub fn into_one(self) -> Option<T> {
        match self {
            Made::One(one) => Some(one),
            Made::Many(_) => None,
        }
    }

    /// All instances in build order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Made::One(one) => vec![one],
            Made::Many(many) => many,
        }
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        match self {
            Made::One(_) => 1,
            Made::Many(many) => many.len(),
        }
    }

    /// True for the empty placeholder returned by undefined factories.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the build produced a list.
    pub fn is_many(&self) -> bool {
        matches!(self, Made::Many(_))
    }

    /// Iterate over the instances in build order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Made::One(one) => std::slice::from_ref(one).iter(),
            Made::Many(many) => many.iter(),
        }
    }
}

impl<T> IntoIterator for Made<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
