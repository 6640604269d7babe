//! Runs the deferred setter and getter calls of a frame against its object.
//!
//! A call that cannot be resolved or fails on the host is reported and
//! skipped; the remaining calls still run.

use crate::error::InflateError;
use crate::scope::{DeferredCall, ScopeArena, ScopeFrame, ScopeId};
use tracing::{debug, trace};
use trellis_model::{display_signature, Environment, ObjectRef, Value};

/// Resolves `call` on the target's kind and invokes it
pub fn invoke(
    env: &dyn Environment,
    target: &ObjectRef,
    call: &DeferredCall,
) -> Result<Value, InflateError> {
    let failure = |reason: String| InflateError::MethodResolution {
        method: call.method.clone(),
        params: display_signature(&call.params),
        kind: target.kind().to_string(),
        reason,
    };

    let method = env
        .methods()
        .resolve(target.kind(), &call.method, &call.params)
        .ok_or_else(|| failure("no matching method".to_string()))?;

    trace!(method = %call.method, target = ?target, "Invoking");
    method
        .invoke(target, &call.args)
        .map_err(|err| failure(err.to_string()))
}

/// Runs every setter of `frame` in declaration order
pub fn apply_setters(env: &dyn Environment, target: &ObjectRef, frame: &ScopeFrame) -> Vec<InflateError> {
    let mut errors = Vec::new();
    for call in frame.setters().values() {
        if let Err(err) = invoke(env, target, call) {
            errors.push(err);
        }
    }
    debug!(
        spec = frame.spec_name(),
        applied = frame.setters().len() - errors.len(),
        failed = errors.len(),
        "Setters applied"
    );
    errors
}

/// Runs every getter of `scope` and stores the results in their field slots.
///
/// When a field has several getters the last successful one determines the
/// stored value.
pub fn apply_getters(
    env: &dyn Environment,
    target: &ObjectRef,
    arena: &mut ScopeArena,
    scope: ScopeId,
) -> Vec<InflateError> {
    let calls: Vec<(String, DeferredCall)> = arena
        .get(scope)
        .getters()
        .iter()
        .flat_map(|(field, calls)| calls.values().map(move |call| (field.clone(), call.clone())))
        .collect();

    let mut errors = Vec::new();
    let mut results = Vec::new();
    for (field, call) in calls {
        match invoke(env, target, &call) {
            Ok(value) => results.push((field, value)),
            Err(err) => errors.push(err),
        }
    }

    let frame = arena.get_mut(scope);
    for (field, value) in results {
        if let Some(slot) = frame.field_mut(&field) {
            slot.value = value;
        }
    }
    errors
}
