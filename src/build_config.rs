//! Pending build configuration.
//!
//! Tracks which steps are active for the next build and how many
//! instances it should produce. The default step is always first, and
//! [`BuildConfig::reset`] returns to that baseline with a count of one.

use crate::error::{FactoryError, FactoryResult};

/// Ordered list of active build steps plus a repetition count.
///
/// # Examples
///
/// ```rust
/// use dashing::BuildConfig;
///
/// let mut config = BuildConfig::new("default");
/// config.add_step("defeated");
/// config.set_times(-5);
///
/// assert_eq!(config.steps(), ["default", "defeated"]);
/// assert_eq!(config.times(), 1);
///
/// config.set_times(3);
/// config.reset();
/// assert_eq!(config.steps(), ["default"]);
/// assert_eq!(config.times(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BuildConfig<S> {
    default: S,
    steps: Vec<S>,
    times: usize,
}

impl<S: Clone> BuildConfig<S> {
    /// Create a configuration whose baseline is `default`.
    pub fn new(default: S) -> Self {
        Self {
            steps: vec![default.clone()],
            default,
            times: 1,
        }
    }

    /// Like [`BuildConfig::new`], failing with
    /// [`FactoryError::MissingDefault`] when no default step is given.
    pub fn try_new(default: Option<S>) -> FactoryResult<Self> {
        default.map(Self::new).ok_or(FactoryError::MissingDefault)
    }

    /// Restore the baseline: only the default step, one repetition.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.steps.push(self.default.clone());
        self.times = 1;
    }

    /// The default step.
    pub fn default_step(&self) -> &S {
        &self.default
    }

    /// Append a step after the ones already active.
    pub fn add_step(&mut self, step: S) {
        self.steps.push(step);
    }

    /// Active steps in activation order, default first.
    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    /// Set the repetition count. Anything below one becomes one.
    pub fn set_times(&mut self, times: i64) {
        self.times = clamp_times(times);
    }

    /// The repetition count, never less than one.
    pub fn times(&self) -> usize {
        self.times
    }
}

pub(crate) fn clamp_times(times: i64) -> usize {
    if times > 0 {
        usize::try_from(times).unwrap_or(usize::MAX)
    } else {
        1
    }
}
