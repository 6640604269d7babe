use super::{finish, Builder};
use crate::dispatcher::Inflater;
use crate::error::{InflateError, InflateResult};
use crate::scope::ScopeId;
use tracing::debug;
use trellis_model::{ObjectRef, ResourceMarker, Specification};

/// Loads a pre-built object from a named declarative resource
pub struct ResourceBuilder {
    marker: ResourceMarker,
}

impl ResourceBuilder {
    pub fn new(marker: ResourceMarker) -> Self {
        Self { marker }
    }

    /// `R.layout.main` names the resource `main`
    pub fn resource_name(identifier: &str) -> &str {
        identifier.rsplit('.').next().unwrap_or(identifier)
    }
}

impl Builder for ResourceBuilder {
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        if pass.is_root(scope) {
            pass.lock_orientation(spec, &self.marker.orientation)?;
        }

        let name = Self::resource_name(&self.marker.resource);
        let object = pass
            .environment()
            .load_resource(name)
            .map_err(|err| InflateError::construction(&spec.name, name, err))?;
        object.update_layout(|layout| {
            layout.origin = self.marker.origin;
            layout.width = self.marker.width;
            layout.height = self.marker.height;
        });
        debug!(spec = %spec.name, resource = name, object = ?object, "Loaded resource");

        pass.set_object(scope, object.clone());
        pass.configure(spec, scope, &object);
        finish(spec, pass, scope, &object)?;
        Ok(Some(object))
    }
}
