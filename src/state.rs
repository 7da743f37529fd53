//! Build states.
//!
//! A state pairs a [`Seed`] with an optional `on_created` callback. The
//! default configuration of a builder, every named state and every
//! per-call override are states. During a build, all active states are
//! combined into a [`CompositeState`] that behaves like a single state:
//! its seed is the composition of the member seeds and its callback runs
//! every member callback in activation order.

use crate::args::Args;
use crate::generator::Capabilities;
use crate::merge::{compose, MergeStrategy};
use crate::seed::Seed;
use std::sync::Arc;

/// Signature of a post-creation callback.
///
/// The callback may mutate the instance in place and return `None`, or
/// return `Some(replacement)` to swap the instance out.
pub type OnCreatedFn<T, G> = dyn Fn(&mut T, &G) -> Option<T> + Send + Sync;

/// One step of a build: contributes arguments and post-processes the instance.
pub trait BuildStep<T, G = Capabilities>: Send + Sync {
    /// Arguments this step contributes.
    fn seed(&self, generator: &G) -> Args;

    /// Post-process a freshly constructed instance, returning the instance
    /// to continue with.
    fn on_created(&self, instance: T, generator: &G) -> T;
}

/// A seed paired with an optional post-creation callback.
///
/// # Examples
///
/// ```rust
/// use dashing::{args, BuildStep, Capabilities, State};
///
/// let state: State<Vec<String>> = State::new(args!["batman"])
///     .with_on_created(|names: &mut Vec<String>, _: &Capabilities| {
///         names.push("robin".to_string());
///         None
///     });
///
/// let generator = Capabilities::new();
/// assert_eq!(state.seed(&generator), args!["batman"]);
///
/// let names = state.on_created(vec!["alfred".to_string()], &generator);
/// assert_eq!(names, vec!["alfred", "robin"]);
/// ```
pub struct State<T, G = Capabilities> {
    seed: Seed<G>,
    on_created: Option<Arc<OnCreatedFn<T, G>>>,
}

impl<T, G> State<T, G> {
    /// Create a state without a callback.
    pub fn new(seed: impl Into<Seed<G>>) -> Self {
        Self {
            seed: seed.into(),
            on_created: None,
        }
    }

    /// Attach a post-creation callback, replacing any previous one.
    pub fn with_on_created<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut T, &G) -> Option<T> + Send + Sync + 'static,
    {
        self.on_created = Some(Arc::new(callback));
        self
    }

    /// The seed of this state.
    pub fn seed_source(&self) -> &Seed<G> {
        &self.seed
    }

    /// Run the callback. `None` means "keep the current instance".
    ///
    /// A state without a callback always returns `None`.
    pub fn apply_on_created(&self, instance: &mut T, generator: &G) -> Option<T> {
        self.on_created
            .as_ref()
            .and_then(|callback| callback(instance, generator))
    }
}

impl<T, G> Clone for State<T, G> {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed.clone(),
            on_created: self.on_created.clone(),
        }
    }
}

impl<T, G> std::fmt::Debug for State<T, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("seed", &self.seed)
            .field("on_created", &self.on_created.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<T, G> BuildStep<T, G> for State<T, G> {
    fn seed(&self, generator: &G) -> Args {
        self.seed.generate(generator)
    }

    fn on_created(&self, mut instance: T, generator: &G) -> T {
        match self.apply_on_created(&mut instance, generator) {
            Some(replacement) => replacement,
            None => instance,
        }
    }
}

/// Ordered collection of steps acting as one step.
///
/// Members are applied in the order they were added: later seeds take
/// precedence, callbacks run first to last.
pub struct CompositeState<T, G = Capabilities> {
    steps: Vec<Arc<dyn BuildStep<T, G>>>,
    strategy: MergeStrategy,
}

impl<T, G> CompositeState<T, G> {
    /// Create an empty composite using the default merge strategy.
    pub fn new() -> Self {
        Self::from_steps(Vec::new())
    }

    /// Create a composite from an ordered list of steps.
    pub fn from_steps(steps: Vec<Arc<dyn BuildStep<T, G>>>) -> Self {
        Self {
            steps,
            strategy: MergeStrategy::default(),
        }
    }

    /// Use `strategy` when composing member seeds.
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Append a step to the end of the member list.
    pub fn add(&mut self, step: Arc<dyn BuildStep<T, G>>) {
        self.steps.push(step);
    }

    /// Remove every member.
    pub fn empty(&mut self) {
        self.steps.clear();
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when there are no members.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T, G> Default for CompositeState<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G> BuildStep<T, G> for CompositeState<T, G> {
    fn seed(&self, generator: &G) -> Args {
        compose(
            self.steps.iter().map(|step| step.seed(generator)),
            self.strategy,
        )
    }

    fn on_created(&self, instance: T, generator: &G) -> T {
        self.steps
            .iter()
            .fold(instance, |instance, step| step.on_created(instance, generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[derive(Debug, Clone, PartialEq)]
    struct Hero {
        name: String,
        defeated: bool,
    }

    fn hero(name: &str) -> Hero {
        Hero {
            name: name.to_string(),
            defeated: false,
        }
    }

    fn step(state: State<Hero>) -> Arc<dyn BuildStep<Hero>> {
        Arc::new(state)
    }

    #[test]
    fn test_state_without_callback_keeps_instance() {
        let state: State<Hero> = State::new(args!["batman"]);
        let generator = Capabilities::new();

        assert!(matches!(state.seed_source(), Seed::Fixed(args) if args == &args!["batman"]));

        let mut instance = hero("batman");
        assert_eq!(state.apply_on_created(&mut instance, &generator), None);
        assert_eq!(state.on_created(hero("batman"), &generator), hero("batman"));
    }

    #[test]
    fn test_state_callback_replaces_instance() {
        let state: State<Hero> =
            State::new(args![]).with_on_created(|_: &mut Hero, _: &Capabilities| Some(hero("joker")));
        let result = state.on_created(hero("batman"), &Capabilities::new());
        assert_eq!(result.name, "joker");
    }

    #[test]
    fn test_composite_seed_respects_order() {
        let composite = CompositeState::from_steps(vec![
            step(State::new(args!["batman", "robin"])),
            step(State::new(args![_, "joker"])),
            step(State::new(args!["twoface", "scarecrow"])),
        ]);
        assert_eq!(
            composite.seed(&Capabilities::new()),
            args!["twoface", "scarecrow"]
        );
    }

    #[test]
    fn test_composite_callbacks_chain() {
        let mutate = State::new(args![]).with_on_created(|h: &mut Hero, _: &Capabilities| {
            h.defeated = true;
            None
        });
        let replace = State::new(args![]).with_on_created(|h: &mut Hero, _: &Capabilities| {
            Some(Hero {
                name: format!("{} (replaced)", h.name),
                defeated: h.defeated,
            })
        });

        let composite = CompositeState::from_steps(vec![step(mutate), step(replace)]);
        let result = composite.on_created(hero("batman"), &Capabilities::new());

        assert_eq!(result.name, "batman (replaced)");
        // The replacing callback saw the mutation made before it.
        assert!(result.defeated);
    }

    #[test]
    fn test_empty_composite() {
        let composite: CompositeState<Hero> = CompositeState::new();
        let generator = Capabilities::new();
        assert!(composite.seed(&generator).is_empty());
        assert_eq!(composite.on_created(hero("batman"), &generator), hero("batman"));
    }

    #[test]
    fn test_add_and_empty() {
        let mut composite: CompositeState<Hero> = CompositeState::new();
        composite.add(step(State::new(args!["batman"])));
        composite.add(step(State::new(args![_, "robin"])));
        assert_eq!(composite.len(), 2);
        assert_eq!(composite.seed(&Capabilities::new()), args!["batman", "robin"]);

        composite.empty();
        assert!(composite.is_empty());
        assert!(composite.seed(&Capabilities::new()).is_empty());
    }

    #[test]
    fn test_nested_composites() {
        let inner: Arc<dyn BuildStep<Hero>> = Arc::new(CompositeState::from_steps(vec![
            step(State::new(args!["batman"])),
            step(State::new(args![_, "robin"])),
        ]));
        let outer: CompositeState<Hero> =
            CompositeState::from_steps(vec![inner, step(State::new(args!["nightwing"]))]);
        assert_eq!(outer.seed(&Capabilities::new()), args!["nightwing", "robin"]);
    }

    #[test]
    fn test_shallow_strategy() {
        let composite: CompositeState<Hero> = CompositeState::from_steps(vec![
            step(State::new(args![{ "name": "bruce", "city": "gotham" }])),
            step(State::new(args![{ "name": "dick" }])),
        ])
        .with_strategy(MergeStrategy::Shallow);
        assert_eq!(
            composite.seed(&Capabilities::new()),
            args![{ "name": "dick" }]
        );
    }
}
