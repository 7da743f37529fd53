//! Builder catalog.
//!
//! A `Catalog` keeps one [`Builder`] per target type and hands them out by
//! type. Looking up a type that was never defined yields
//! [`Factory::Null`], a do-nothing builder, so fixture code can ask for a
//! factory without first checking whether one exists.

use crate::args::{Args, FromArgs};
use crate::builder::{BuildRequest, Builder};
use crate::error::FactoryResult;
use crate::generator::Capabilities;
use crate::made::Made;
use crate::seed::Seed;
use crate::state_name::StateName;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

struct Entry {
    type_name: &'static str,
    builder: Box<dyn Any + Send + Sync>,
}

/// Registry of builders keyed by the type they make.
///
/// # Examples
///
/// ```rust
/// use dashing::{args, Args, Catalog};
///
/// #[derive(Debug, PartialEq)]
/// struct Hero {
///     name: String,
/// }
///
/// let mut catalog = Catalog::new();
/// catalog
///     .define(|args: &Args| Ok(Hero { name: args.require(0)? }), args!["batman"])
///     .register_state("sidekick", args!["robin"])
///     .unwrap();
///
/// let hero = catalog
///     .factory::<Hero>()
///     .apply_state("sidekick")
///     .unwrap()
///     .make()
///     .unwrap()
///     .into_one();
/// assert_eq!(hero, Some(Hero { name: "robin".to_string() }));
/// ```
pub struct Catalog<G = Capabilities> {
    generator: G,
    builders: HashMap<TypeId, Entry>,
}

impl Catalog<Capabilities> {
    /// Create a catalog whose builders use an empty [`Capabilities`] generator.
    pub fn new() -> Self {
        Self::with_generator(Capabilities::default())
    }
}

impl Default for Catalog<Capabilities> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Clone + Send + Sync + 'static> Catalog<G> {
    /// Create a catalog that gives every builder a clone of `generator`.
    ///
    /// Each defined type owns its clone, so a generator with internal
    /// state (a seeded random source, a counter) advances separately per
    /// type. Use a shared handle such as `Arc<Mutex<Rng>>` as `G` when
    /// all builders must draw from one stream.
    ///
    /// ```rust
    /// use dashing::{Args, Catalog, Seed};
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let counter = Arc::new(AtomicU32::new(0));
    /// let mut catalog = Catalog::with_generator(Arc::clone(&counter));
    ///
    /// let next = || {
    ///     Seed::dynamic(|n: &Arc<AtomicU32>| {
    ///         let mut args = Args::new();
    ///         args.push(n.fetch_add(1, Ordering::SeqCst));
    ///         args
    ///     })
    /// };
    /// catalog.define(|args: &Args| args.require::<u32>(0), next());
    /// catalog.define(|args: &Args| Ok(args.require::<u32>(0)? as u64), next());
    ///
    /// catalog.factory::<u32>().make()?;
    /// catalog.factory::<u64>().make()?;
    /// assert_eq!(counter.load(Ordering::SeqCst), 2);
    /// assert!(Arc::ptr_eq(catalog.generator(), &counter));
    /// # Ok::<(), dashing::FactoryError>(())
    /// ```
    pub fn with_generator(generator: G) -> Self {
        Self {
            generator,
            builders: HashMap::new(),
        }
    }

    /// Define (or redefine) the builder for `T`.
    ///
    /// Redefining a type replaces its previous builder and all of its states.
    pub fn define<T, F>(&mut self, constructor: F, seed: impl Into<Seed<G>>) -> Factory<'_, T, G>
    where
        T: 'static,
        F: Fn(&Args) -> FactoryResult<T> + Send + Sync + 'static,
    {
        let builder = Builder::with_generator(self.generator.clone(), constructor, seed);
        self.insert(builder)
    }

    /// Define the builder for a type that knows how to construct itself.
    pub fn define_type<T>(&mut self, seed: impl Into<Seed<G>>) -> Factory<'_, T, G>
    where
        T: FromArgs + 'static,
    {
        self.define(T::from_args, seed)
    }

    /// Store a prepared builder, replacing any previous builder for `T`.
    pub fn insert<T: 'static>(&mut self, builder: Builder<T, G>) -> Factory<'_, T, G> {
        let replaced = self
            .builders
            .insert(
                TypeId::of::<T>(),
                Entry {
                    type_name: type_name::<T>(),
                    builder: Box::new(builder),
                },
            )
            .is_some();
        tracing::debug!(model = type_name::<T>(), replaced, "Defined builder");

        self.factory::<T>()
    }

    /// The builder for `T`, or [`Factory::Null`] if none was defined.
    pub fn factory<T: 'static>(&mut self) -> Factory<'_, T, G> {
        match self.get_mut::<T>() {
            Some(builder) => Factory::Defined(builder),
            None => Factory::Null,
        }
    }

    /// The builder for `T`, if defined.
    pub fn get<T: 'static>(&self) -> Option<&Builder<T, G>> {
        self.builders
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.builder.downcast_ref())
    }

    /// The builder for `T`, mutably, if defined.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut Builder<T, G>> {
        self.builders
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.builder.downcast_mut())
    }

    /// Whether a builder for `T` was defined.
    pub fn contains<T: 'static>(&self) -> bool {
        self.builders.contains_key(&TypeId::of::<T>())
    }

    /// Names of all defined types, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builders.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Number of defined builders.
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// True when no builder was defined.
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// The generator cloned into new builders.
    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G> std::fmt::Debug for Catalog<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field(
                "types",
                &self.builders.values().map(|e| e.type_name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Handle to a catalog builder.
///
/// [`Factory::Null`] stands in for types nobody defined: every method is a
/// no-op that succeeds, and making returns the empty placeholder
/// `Made::Many(vec![])`.
pub enum Factory<'a, T, G = Capabilities> {
    /// A defined builder.
    Defined(&'a mut Builder<T, G>),
    /// No builder is defined for this type.
    Null,
}

impl<'a, T: 'static, G: 'static> Factory<'a, T, G> {
    /// Whether this handle refers to a real builder.
    pub fn is_defined(&self) -> bool {
        matches!(self, Factory::Defined(_))
    }

    /// The underlying builder, if defined.
    pub fn builder(&mut self) -> Option<&mut Builder<T, G>> {
        match self {
            Factory::Defined(builder) => Some(&mut **builder),
            Factory::Null => None,
        }
    }

    /// See [`Builder::register_state`].
    pub fn register_state(
        &mut self,
        name: impl Into<StateName>,
        seed: impl Into<Seed<G>>,
    ) -> FactoryResult<&mut Self> {
        if let Factory::Defined(builder) = self {
            builder.register_state(name, seed)?;
        }
        Ok(self)
    }

    /// See [`Builder::register_state_with`].
    pub fn register_state_with<F>(
        &mut self,
        name: impl Into<StateName>,
        seed: impl Into<Seed<G>>,
        on_created: F,
    ) -> FactoryResult<&mut Self>
    where
        F: Fn(&mut T, &G) -> Option<T> + Send + Sync + 'static,
    {
        if let Factory::Defined(builder) = self {
            builder.register_state_with(name, seed, on_created)?;
        }
        Ok(self)
    }

    /// See [`Builder::apply_state`].
    pub fn apply_state(&mut self, name: &str) -> FactoryResult<&mut Self> {
        if let Factory::Defined(builder) = self {
            builder.apply_state(name)?;
        }
        Ok(self)
    }

    /// See [`Builder::apply_states`].
    pub fn apply_states<I>(&mut self, names: I) -> FactoryResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if let Factory::Defined(builder) = self {
            builder.apply_states(names)?;
        }
        Ok(self)
    }

    /// See [`Builder::times`].
    pub fn times(&mut self, times: i64) -> &mut Self {
        if let Factory::Defined(builder) = self {
            builder.times(times);
        }
        self
    }

    /// See [`Builder::make`].
    pub fn make(&mut self) -> FactoryResult<Made<T>> {
        match self {
            Factory::Defined(builder) => builder.make(),
            Factory::Null => Ok(Made::Many(Vec::new())),
        }
    }

    /// See [`Builder::make_with`].
    pub fn make_with(&mut self, overrides: impl Into<Seed<G>>) -> FactoryResult<Made<T>> {
        match self {
            Factory::Defined(builder) => builder.make_with(overrides),
            Factory::Null => Ok(Made::Many(Vec::new())),
        }
    }

    /// See [`Builder::build`].
    pub fn build(&self, request: &BuildRequest<G>) -> FactoryResult<Made<T>> {
        match self {
            Factory::Defined(builder) => builder.build(request),
            Factory::Null => Ok(Made::Many(Vec::new())),
        }
    }

    /// See [`Builder::reset`].
    pub fn reset(&mut self) {
        if let Factory::Defined(builder) = self {
            builder.reset();
        }
    }
}
