use super::Builder;
use crate::dispatcher::Inflater;
use crate::error::InflateResult;
use crate::invoker::invoke;
use crate::scope::{DeferredCall, ScopeId};
use tracing::debug;
use trellis_model::{InvisibleMarker, LayoutParams, ObjectRef, Specification};

/// Zero-argument method run on a freshly constructed entity, when its kind has one
pub const ENTITY_CREATE_METHOD: &str = "create";

/// Constructs a non-visual entity.
///
/// The entity is configured and registered in the parent's children
/// registry but never attached to a container.
pub struct InvisibleBuilder {
    marker: InvisibleMarker,
}

impl InvisibleBuilder {
    pub fn new(marker: InvisibleMarker) -> Self {
        Self { marker }
    }
}

impl Builder for InvisibleBuilder {
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        let entity = pass.construct(spec, &self.marker.kind, &LayoutParams::default())?;
        if pass.environment().methods().has_method(entity.kind(), ENTITY_CREATE_METHOD) {
            let call = DeferredCall {
                method: ENTITY_CREATE_METHOD.to_string(),
                params: Vec::new(),
                args: Vec::new(),
            };
            if let Err(err) = invoke(pass.environment(), &entity, &call) {
                pass.report(err);
            }
        }
        debug!(spec = %spec.name, entity = ?entity, "Constructed entity");

        pass.set_object(scope, entity.clone());
        pass.configure(spec, scope, &entity);
        pass.complete(spec, scope, Some(&entity));
        Ok(None)
    }
}
