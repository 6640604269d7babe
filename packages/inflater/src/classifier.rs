//! Field classification.
//!
//! Every declared field lands in exactly one role table of its frame:
//! variables, bindings, getters, multi-argument setters, or (without a role
//! marker) plain setters. Nothing is invoked here; the tables are consumed
//! once the target object exists.

use crate::error::{InflateError, InflateResult};
use crate::scope::{DeferredCall, PendingBinding, ScopeArena, ScopeId};
use tracing::debug;
use trellis_model::{
    accessor_name, signature_of, Environment, FieldDecl, FieldRole, FieldSlot, InitScope,
    ParamType, Value,
};

/// Initializer view over the frame being classified
struct FieldInitScope<'a> {
    env: &'a dyn Environment,
    arena: &'a ScopeArena,
    scope: ScopeId,
}

impl InitScope for FieldInitScope<'_> {
    fn environment(&self) -> &dyn Environment {
        self.env
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.arena.get(self.scope).field(name).cloned()
    }

    fn variable(&self, name: &str) -> Option<Value> {
        self.arena.lookup_variable(self.scope, name).map(|(_, value)| value)
    }
}

/// Setter taking the field's single value
pub(crate) fn plain_setter(field: &str, ty: ParamType, value: Value) -> DeferredCall {
    DeferredCall {
        method: accessor_name("set", field),
        params: vec![ty],
        args: vec![value],
    }
}

/// Deferred call spreading a list value as the argument list
fn list_call(
    spec: &str,
    field: &FieldDecl,
    role: &FieldRole,
    method: String,
    value: &Value,
) -> InflateResult<DeferredCall> {
    let args = value.as_list().ok_or_else(|| InflateError::InvalidSetterShape {
        spec: spec.to_string(),
        field: field.name.clone(),
        role: role.label(),
        found: value.type_name(),
    })?;
    Ok(DeferredCall {
        method,
        params: signature_of(args),
        args: args.to_vec(),
    })
}

/// Classifies one field into the role tables of `scope`.
///
/// The field's current value (its initializer result, or its literal) is
/// recorded as a field slot even when the role rejects it.
pub fn classify(
    spec: &str,
    field: &FieldDecl,
    env: &dyn Environment,
    arena: &mut ScopeArena,
    scope: ScopeId,
) -> InflateResult<()> {
    let value = match &field.init {
        Some(init) => init.evaluate(&FieldInitScope {
            env,
            arena: &*arena,
            scope,
        }),
        None => field.value.clone(),
    };
    let ty = field.ty.clone().unwrap_or_else(|| value.param_type());

    let frame = arena.get_mut(scope);
    match frame.field_mut(&field.name) {
        Some(slot) => {
            slot.ty = ty.clone();
            slot.value = value.clone();
        }
        None => frame.fields.push(FieldSlot {
            name: field.name.clone(),
            ty: ty.clone(),
            value: value.clone(),
        }),
    }

    match &field.role {
        Some(role @ FieldRole::Getter { method }) => {
            let method = method
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| accessor_name("get", &field.name));
            let call = list_call(spec, field, role, method.clone(), &value)?;
            debug!(spec, field = %field.name, method = %method, "Field classified as getter");
            frame
                .getters
                .entry(field.name.clone())
                .or_default()
                .insert(method, call);
        }
        Some(FieldRole::Variable) => {
            debug!(spec, field = %field.name, "Field classified as variable");
            frame.variables.push((field.name.clone(), value));
        }
        Some(role @ FieldRole::Setter) => {
            let call = list_call(spec, field, role, accessor_name("set", &field.name), &value)?;
            debug!(spec, field = %field.name, arity = call.args.len(), "Field classified as setter");
            frame.setters.insert(call.method.clone(), call);
        }
        Some(FieldRole::Binding { observed }) => {
            debug!(spec, field = %field.name, observed = %observed, "Field classified as binding");
            frame.bindings.push(PendingBinding {
                field: field.name.clone(),
                observed: observed.clone(),
            });
        }
        None => {
            let call = plain_setter(&field.name, ty, value);
            frame.setters.insert(call.method.clone(), call);
        }
    }
    Ok(())
}
