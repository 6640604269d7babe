use super::{finish, Builder};
use crate::dispatcher::Inflater;
use crate::error::InflateResult;
use crate::scope::ScopeId;
use tracing::{debug, warn};
use trellis_model::{LayoutMarker, LayoutParams, ObjectRef, Padding, Specification};

/// Constructs an object of the declared kind
pub struct LayoutBuilder {
    marker: LayoutMarker,
}

impl LayoutBuilder {
    pub fn new(marker: LayoutMarker) -> Self {
        Self { marker }
    }

    fn params(&self, spec: &Specification) -> LayoutParams {
        let padding = Padding::from_declared(&self.marker.padding).unwrap_or_else(|| {
            warn!(
                spec = %spec.name,
                count = self.marker.padding.len(),
                "Padding takes one or four values, using zero"
            );
            Padding::default()
        });
        LayoutParams {
            origin: self.marker.origin,
            width: self.marker.width,
            height: self.marker.height,
            padding,
            axis: self.marker.axis,
        }
    }
}

impl Builder for LayoutBuilder {
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        if pass.is_root(scope) {
            pass.lock_orientation(spec, &self.marker.orientation)?;
        }

        let params = self.params(spec);
        let object = pass.construct_or_fallback(spec, &self.marker.kind, &params)?;
        object.set_layout(params);
        debug!(spec = %spec.name, object = ?object, "Constructed");

        pass.set_object(scope, object.clone());
        pass.configure(spec, scope, &object);
        finish(spec, pass, scope, &object)?;
        Ok(Some(object))
    }
}
