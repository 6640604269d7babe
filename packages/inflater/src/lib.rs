//! # Trellis Inflater
//!
//! Turns a tree of [`Specification`](trellis_model::Specification) nodes into
//! a live object tree.
//!
//! The pass is depth-first and synchronous. Each node gets a scope frame
//! whose parent is the frame of the node that dispatched it; fields are
//! classified into role tables on that frame, bindings are resolved against
//! the nearest frame exporting the requested name, and deferred getters and
//! setters run once the node's object exists.
//!
//! ```ignore
//! let env = HeadlessEnvironment::with_standard_kinds();
//! let mut inflater = Inflater::new(&env);
//! let root = inflater.inflate(&spec)?;
//! for diagnostic in inflater.diagnostics() {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

pub mod binding;
pub mod builders;
pub mod classifier;
pub mod dispatcher;
pub mod error;
pub mod headless;
pub mod invoker;
pub mod options;
pub mod orientation;
pub mod scope;
pub mod validator;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_builders;


pub use builders::{builder_identifier, Builder, BuilderFactory, BuilderRegistry, BUILDER_SUFFIX};
pub use dispatcher::{inflate, Inflater};
pub use error::{InflateError, InflateResult, Severity};
pub use headless::HeadlessEnvironment;
pub use options::InflateOptions;
pub use orientation::orientation_lock;
pub use scope::{DeferredCall, PendingBinding, ScopeArena, ScopeFrame, ScopeId};
pub use validator::{ValidationLevel, ValidationWarning, Validator};
