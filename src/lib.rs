//! # dashing - Composable Test-Data Builders
//!
//! Builds configured instances of your types, typically for tests:
//! - **Seeds** provide constructor arguments, fixed or computed from a generator
//! - **States** are named presets that override a subset of those arguments
//! - **Overrides** are one-off arguments for a single build
//! - **Callbacks** post-process every instance after construction
//!
//! ## Core Concepts
//!
//! ### Build Pipeline
//!
//! ```text
//! [default state] → [applied states...] → [overrides] → constructor → on_created chain
//! ```
//!
//! 1. Seeds of all active steps are merged left to right; a set slot wins,
//!    an unset slot falls through to the one before it
//! 2. The constructor receives the merged [`Args`] positionally
//! 3. Every step's `on_created` callback runs in activation order
//! 4. The builder resets to its default state
//!
//! ## Example
//!
//! ```rust
//! use dashing::*;
//!
//! #[derive(Debug)]
//! struct Duo {
//!     hero: String,
//!     sidekick: String,
//! }
//!
//! let mut builder = Builder::new(
//!     |args: &Args| Ok(Duo { hero: args.require(0)?, sidekick: args.require(1)? }),
//!     args!["batman", "robin"],
//! );
//! builder.register_state("villains", args!["joker", "harley"])?;
//!
//! let duo = builder.make()?.into_one().unwrap();
//! assert_eq!(duo.sidekick, "robin");
//!
//! let duos = builder.apply_state("villains")?.times(2).make_with(args![_, "penguin"])?;
//! assert_eq!(duos.len(), 2);
//! for duo in duos {
//!     assert_eq!((duo.hero.as_str(), duo.sidekick.as_str()), ("joker", "penguin"));
//! }
//! # Ok::<(), FactoryError>(())
//! ```
//!
//! ## Modules
//!
//! - [`args`] - Constructor arguments with an explicit unset marker
//! - [`seed`] - Fixed and generator-backed seeds
//! - [`merge`] - Seed composition rules
//! - [`state`] - States and composite states
//! - [`build_config`] - Pending build configuration
//! - [`builder`] - The builder and build requests
//! - [`catalog`] - Builders keyed by the type they make
//! - [`made`] - Build results
//! - [`generator`] - Default generator
//! - [`error`] - Error types

pub mod args;
pub mod build_config;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod made;
pub mod merge;
pub mod seed;
pub mod state;
pub mod state_name;

// Used by the `args!` macro.
#[doc(hidden)]
pub use serde_json;

// Re-export main types for convenience
pub use args::{Args, FromArgs};
pub use build_config::BuildConfig;
pub use builder::{BuildRequest, Builder, Constructor};
pub use catalog::{Catalog, Factory};
pub use error::{FactoryError, FactoryResult};
pub use generator::Capabilities;
pub use made::Made;
pub use merge::MergeStrategy;
pub use seed::Seed;
pub use state::{BuildStep, CompositeState, State};
pub use state_name::StateName;
