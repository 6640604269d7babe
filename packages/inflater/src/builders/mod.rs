//! Builder strategies, one per primary marker.
//!
//! Every builder follows the same sequence: construct the object, configure
//! it from the node's fields, inflate nested specifications into it when it
//! is a container, then run the completion hook. They differ in how the
//! object is obtained and what the fields are applied to.

mod adapter;
mod embed;
mod invisible;
mod layout;
mod resource;

pub use adapter::AdapterBuilder;
pub use embed::EmbedBuilder;
pub use invisible::InvisibleBuilder;
pub use layout::LayoutBuilder;
pub use resource::ResourceBuilder;

use crate::dispatcher::Inflater;
use crate::error::InflateResult;
use crate::scope::ScopeId;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use trellis_model::{LayoutParams, ObjectRef, Origin, Sizing, Specification};

/// Suffix appended to a marker type name to form its builder identifier
pub const BUILDER_SUFFIX: &str = "Builder";

pub fn builder_identifier(marker_type: &str) -> String {
    format!("{}{}", marker_type, BUILDER_SUFFIX)
}

pub trait Builder {
    /// Builds the node `spec` whose frame is `scope`. Returns the object to
    /// attach to the enclosing container, if any.
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>>;
}

pub type BuilderFactory = Rc<dyn Fn() -> Box<dyn Builder>>;

/// Builders for custom markers, keyed by builder identifier
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    factories: HashMap<String, BuilderFactory>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, identifier: impl Into<String>, factory: BuilderFactory) {
        self.factories.insert(identifier.into(), factory);
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    pub fn create(&self, identifier: &str) -> Option<Box<dyn Builder>> {
        self.factories.get(identifier).map(|factory| factory())
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

/// Geometry-only construction parameters
pub(crate) fn placement(origin: Origin, width: Sizing, height: Sizing) -> LayoutParams {
    LayoutParams {
        origin,
        width,
        height,
        ..LayoutParams::default()
    }
}

/// Nested specifications, then the completion hook
pub(crate) fn finish(
    spec: &Specification,
    pass: &mut Inflater<'_>,
    scope: ScopeId,
    object: &ObjectRef,
) -> InflateResult<()> {
    pass.inflate_children(spec, scope, object)?;
    pass.complete(spec, scope, Some(object));
    Ok(())
}
