use super::{finish, placement, Builder};
use crate::dispatcher::Inflater;
use crate::error::{InflateError, InflateResult};
use crate::invoker::invoke;
use crate::scope::{DeferredCall, ScopeId};
use tracing::debug;
use trellis_model::{AdapterMarker, LayoutParams, ObjectRef, Specification, Value};

/// Method an adapter answers with the object it produces
pub const ADAPTER_VIEW_METHOD: &str = "getView";

/// Asks a factory object for the object to attach.
///
/// The node's fields configure the adapter, not the produced object; with
/// `setters_first` they are applied before the adapter is asked.
pub struct AdapterBuilder {
    marker: AdapterMarker,
}

impl AdapterBuilder {
    pub fn new(marker: AdapterMarker) -> Self {
        Self { marker }
    }

    fn produce(&self, spec: &Specification, pass: &Inflater<'_>, adapter: &ObjectRef) -> InflateResult<ObjectRef> {
        let call = DeferredCall {
            method: ADAPTER_VIEW_METHOD.to_string(),
            params: Vec::new(),
            args: Vec::new(),
        };
        match invoke(pass.environment(), adapter, &call)? {
            Value::Object(view) => Ok(view),
            _ => Err(InflateError::AdapterProducedNothing {
                spec: spec.name.clone(),
                kind: adapter.kind().to_string(),
            }),
        }
    }
}

impl Builder for AdapterBuilder {
    fn build(
        &mut self,
        spec: &Specification,
        pass: &mut Inflater<'_>,
        scope: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        let adapter = pass.construct(spec, &self.marker.kind, &LayoutParams::default())?;
        if self.marker.setters_first {
            pass.configure(spec, scope, &adapter);
        }

        let view = self.produce(spec, pass, &adapter)?;
        view.set_layout(placement(self.marker.origin, self.marker.width, self.marker.height));
        debug!(spec = %spec.name, adapter = ?adapter, view = ?view, "Adapter produced object");
        pass.set_object(scope, view.clone());

        if !self.marker.setters_first {
            pass.configure(spec, scope, &adapter);
        }
        finish(spec, pass, scope, &view)?;
        Ok(Some(view))
    }
}
