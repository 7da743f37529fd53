//! Builder module.
//!
//! Provides the `Builder` type, the main entry point for making instances.
//! It owns the target constructor, the generator, the default state and
//! every named state, and sequences a build:
//!
//! 1. Collect the active steps: default, applied states, overrides
//! 2. Compose their seeds into one argument list
//! 3. Call the constructor with that list
//! 4. Run every step's `on_created` callback in order
//! 5. Repeat for the requested count, then reset

use crate::args::{Args, FromArgs};
use crate::build_config::{clamp_times, BuildConfig};
use crate::error::{FactoryError, FactoryResult};
use crate::generator::Capabilities;
use crate::made::Made;
use crate::merge::MergeStrategy;
use crate::seed::Seed;
use crate::state::{BuildStep, CompositeState, State};
use crate::state_name::StateName;
use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

/// Signature of a target constructor.
pub type Constructor<T> = dyn Fn(&Args) -> FactoryResult<T> + Send + Sync;

type Step<T, G> = Arc<dyn BuildStep<T, G>>;

// Upper bound on the result buffer reserved before the first instance exists.
const PREALLOCATE_LIMIT: usize = 64;

/// Makes configured instances of `T`.
///
/// Named states and repetition counts set through the fluent API only
/// apply to the next [`make`](Builder::make) or [`make_with`](Builder::make_with)
/// call; the builder always resets afterwards.
///
/// # Examples
///
/// ```rust
/// use dashing::{args, Args, Builder};
///
/// #[derive(Debug)]
/// struct Crew(String, String, String);
///
/// let mut builder = Builder::new(
///     |args: &Args| Ok(Crew(args.require(0)?, args.require(1)?, args.require(2)?)),
///     args!["batman", "robin", "alfred"],
/// );
///
/// let crew = builder.make().unwrap().into_one().unwrap();
/// assert_eq!(crew.1, "robin");
///
/// let crew = builder
///     .make_with(args![_, "joker", "two-face"])
///     .unwrap()
///     .into_one()
///     .unwrap();
/// assert_eq!((crew.0.as_str(), crew.1.as_str()), ("batman", "joker"));
///
/// builder.register_state("defeated", args![_, "KO robin"]).unwrap();
/// let crew = builder
///     .apply_state("defeated")
///     .unwrap()
///     .make()
///     .unwrap()
///     .into_one()
///     .unwrap();
/// assert_eq!(crew.1, "KO robin");
/// assert_eq!(crew.2, "alfred");
/// ```
pub struct Builder<T, G = Capabilities> {
    generator: G,
    constructor: Box<Constructor<T>>,
    default_state: Arc<State<T, G>>,
    states: HashMap<StateName, Arc<State<T, G>>>,
    config: BuildConfig<Step<T, G>>,
    strategy: MergeStrategy,
}

impl<T: 'static> Builder<T, Capabilities> {
    /// Create a builder with an empty [`Capabilities`] generator.
    pub fn new<F>(constructor: F, seed: impl Into<Seed>) -> Self
    where
        F: Fn(&Args) -> FactoryResult<T> + Send + Sync + 'static,
    {
        Self::with_generator(Capabilities::default(), constructor, seed)
    }

    /// Create a builder for a type that knows how to construct itself.
    pub fn of(seed: impl Into<Seed>) -> Self
    where
        T: FromArgs,
    {
        Self::new(T::from_args, seed)
    }
}

impl<T: 'static, G: 'static> Builder<T, G> {
    /// Create a builder that passes `generator` to seeds and callbacks.
    pub fn with_generator<F>(generator: G, constructor: F, seed: impl Into<Seed<G>>) -> Self
    where
        F: Fn(&Args) -> FactoryResult<T> + Send + Sync + 'static,
    {
        let default_state = Arc::new(State::new(seed));
        let default_step: Step<T, G> = default_state.clone();
        Self {
            generator,
            constructor: Box::new(constructor),
            default_state,
            states: HashMap::new(),
            config: BuildConfig::new(default_step),
            strategy: MergeStrategy::default(),
        }
    }

    /// Set the default `on_created` callback, run first after every build.
    ///
    /// Meant for construction time: any pending activations are discarded.
    pub fn on_created<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut T, &G) -> Option<T> + Send + Sync + 'static,
    {
        let state = (*self.default_state).clone().with_on_created(callback);
        self.default_state = Arc::new(state);
        let default_step: Step<T, G> = self.default_state.clone();
        self.config = BuildConfig::new(default_step);
        self
    }

    /// Choose how seeds are merged. Defaults to [`MergeStrategy::Deep`].
    pub fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Register a named state that only overrides arguments.
    ///
    /// Fails with [`FactoryError::DuplicateState`] if the name is taken.
    pub fn register_state(
        &mut self,
        name: impl Into<StateName>,
        seed: impl Into<Seed<G>>,
    ) -> FactoryResult<&mut Self> {
        self.register(name, State::new(seed))
    }

    /// Register a named state with a post-creation callback.
    pub fn register_state_with<F>(
        &mut self,
        name: impl Into<StateName>,
        seed: impl Into<Seed<G>>,
        on_created: F,
    ) -> FactoryResult<&mut Self>
    where
        F: Fn(&mut T, &G) -> Option<T> + Send + Sync + 'static,
    {
        self.register(name, State::new(seed).with_on_created(on_created))
    }

    /// Register a prepared [`State`] under `name`.
    pub fn register(
        &mut self,
        name: impl Into<StateName>,
        state: State<T, G>,
    ) -> FactoryResult<&mut Self> {
        let name = name.into();
        if self.states.contains_key(&name) {
            return Err(FactoryError::DuplicateState(name));
        }

        tracing::debug!(model = type_name::<T>(), state = %name, "Registered state");
        self.states.insert(name, Arc::new(state));
        Ok(self)
    }

    /// Whether a state is registered under `name`.
    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Names of all registered states, in no particular order.
    pub fn state_names(&self) -> Vec<&StateName> {
        self.states.keys().collect()
    }

    /// Activate a named state for the next build.
    pub fn apply_state(&mut self, name: &str) -> FactoryResult<&mut Self> {
        self.apply_states([name])
    }

    /// Activate several named states, left to right.
    ///
    /// Every name is checked before any is activated: on
    /// [`FactoryError::UnknownState`] the pending build is left as it was.
    pub fn apply_states<I>(&mut self, names: I) -> FactoryResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let steps = names
            .into_iter()
            .map(|name| self.lookup(name.as_ref()))
            .collect::<FactoryResult<Vec<_>>>()?;

        tracing::debug!(
            model = type_name::<T>(),
            count = steps.len(),
            "Applied states"
        );
        for step in steps {
            self.config.add_step(step);
        }
        Ok(self)
    }

    /// Number of instances the next build makes. Values below one mean one.
    pub fn times(&mut self, times: i64) -> &mut Self {
        self.config.set_times(times);
        self
    }

    /// Make instances with the pending configuration and no overrides.
    pub fn make(&mut self) -> FactoryResult<Made<T>> {
        self.make_with(Seed::empty())
    }

    /// Make instances with `overrides` applied on top of every active state.
    ///
    /// Returns [`Made::One`] unless more than one repetition was requested.
    /// The pending configuration is reset afterwards, also when the
    /// constructor fails.
    pub fn make_with(&mut self, overrides: impl Into<Seed<G>>) -> FactoryResult<Made<T>> {
        let overrides: Step<T, G> = Arc::new(State::new(overrides));
        self.config.add_step(overrides);

        let made = self.run(self.config.steps(), self.config.times());
        self.reset();
        made
    }

    /// Make instances for an explicit request.
    ///
    /// Unlike the fluent API this reads nothing from, and writes nothing
    /// to, the pending configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashing::{args, Args, BuildRequest, Builder};
    ///
    /// let mut builder = Builder::new(
    ///     |args: &Args| args.require::<String>(0),
    ///     args!["batman"],
    /// );
    /// builder.register_state("retired", args!["bruce"]).unwrap();
    ///
    /// let request = BuildRequest::new().state("retired").times(2);
    /// let names = builder.build(&request).unwrap().into_vec();
    /// assert_eq!(names, vec!["bruce", "bruce"]);
    /// ```
    pub fn build(&self, request: &BuildRequest<G>) -> FactoryResult<Made<T>> {
        let mut steps = Vec::with_capacity(request.states.len() + 2);
        steps.push(Arc::clone(self.config.default_step()));
        for name in &request.states {
            steps.push(self.lookup(name.as_str())?);
        }
        let overrides: Step<T, G> = Arc::new(State::new(request.overrides.clone()));
        steps.push(overrides);

        self.run(&steps, request.times)
    }

    /// Drop pending states, overrides and repetition count.
    pub fn reset(&mut self) {
        self.config.reset();
    }

    /// The pending build configuration.
    pub fn config(&self) -> &BuildConfig<Arc<dyn BuildStep<T, G>>> {
        &self.config
    }

    /// The generator handed to seeds and callbacks.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn lookup(&self, name: &str) -> FactoryResult<Step<T, G>> {
        match self.states.get(name) {
            Some(state) => {
                let step: Step<T, G> = state.clone();
                Ok(step)
            }
            None => Err(FactoryError::UnknownState(StateName::new(name))),
        }
    }

    fn run(&self, steps: &[Step<T, G>], times: usize) -> FactoryResult<Made<T>> {
        tracing::debug!(
            model = type_name::<T>(),
            steps = steps.len(),
            times,
            "Building instances"
        );

        let mut made = Vec::with_capacity(times.min(PREALLOCATE_LIMIT));
        for index in 0..times {
            let composite = CompositeState::from_steps(steps.to_vec()).with_strategy(self.strategy);
            let args = composite.seed(&self.generator);
            let instance = (self.constructor)(&args)?;
            tracing::trace!(model = type_name::<T>(), index, "Constructed instance");
            made.push(composite.on_created(instance, &self.generator));
        }

        Ok(Made::from_vec(made))
    }
}

impl<T, G> std::fmt::Debug for Builder<T, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("model", &type_name::<T>())
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("pending_steps", &self.config.steps().len())
            .field("times", &self.config.times())
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Everything one build needs, as a value.
///
/// States apply in the order they were added, then the overrides.
pub struct BuildRequest<G = Capabilities> {
    states: Vec<StateName>,
    overrides: Seed<G>,
    times: usize,
}

impl<G> BuildRequest<G> {
    /// A request for one instance with no states and no overrides.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            overrides: Seed::empty(),
            times: 1,
        }
    }

    /// Apply a named state.
    pub fn state(mut self, name: impl Into<StateName>) -> Self {
        self.states.push(name.into());
        self
    }

    /// Apply several named states, left to right.
    pub fn states<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StateName>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    /// Override arguments on top of every state.
    pub fn overrides(mut self, seed: impl Into<Seed<G>>) -> Self {
        self.overrides = seed.into();
        self
    }

    /// Number of instances to make. Values below one mean one.
    pub fn times(mut self, times: i64) -> Self {
        self.times = clamp_times(times);
        self
    }

    /// The states this request applies.
    pub fn state_list(&self) -> &[StateName] {
        &self.states
    }

    /// The repetition count.
    pub fn repetitions(&self) -> usize {
        self.times
    }
}

impl<G> Default for BuildRequest<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Clone for BuildRequest<G> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
            overrides: self.overrides.clone(),
            times: self.times,
        }
    }
}

impl<G> std::fmt::Debug for BuildRequest<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildRequest")
            .field("states", &self.states)
            .field("overrides", &self.overrides)
            .field("times", &self.times)
            .finish()
    }
}
