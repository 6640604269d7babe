use super::{finish, Builder};
use crate::dispatcher::Inflater;
use crate::error::{InflateError, InflateResult};
use crate::scope::ScopeId;
use tracing::debug;
use trellis_model::{EmbedMarker, ObjectRef, Specification};

/// Adopts the object built from another registered specification.
///
/// The embedded specification is dispatched under this node's frame before
/// this node's fields are classified, so its bindings resolve against the
/// variables of this node's ancestors, not this node's own. This node's
/// fields are then applied on top of the adopted object.
pub struct EmbedBuilder {
    marker: EmbedMarker,
}

impl EmbedBuilder {
    pub fn new(marker: EmbedMarker) -> Self {
        Self { marker }
    }
}

impl Builder for EmbedBuilder {
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        let target_name = &self.marker.layout;
        let target = pass
            .lookup_specification(target_name)
            .ok_or_else(|| InflateError::UnknownSpecification {
                spec: spec.name.clone(),
                name: target_name.clone(),
            })?;

        debug!(spec = %spec.name, target = %target_name, "Embedding");
        let Some(object) = pass.dispatch_embedded(&target, scope)? else {
            return Ok(None);
        };

        pass.set_object(scope, object.clone());
        pass.configure(spec, scope, &object);
        finish(spec, pass, scope, &object)?;
        Ok(Some(object))
    }
}
