//! Cross-scope binding resolution.

use crate::classifier::plain_setter;
use crate::error::InflateError;
use crate::scope::{ScopeArena, ScopeId};
use tracing::debug;
use trellis_model::Value;

/// Resolves every pending binding of `scope` against the variables exported
/// by `scope` and its ancestors, nearest first.
///
/// A level is consulted by its first declaration of the name; a `Null` value
/// does not satisfy the binding and the walk continues upwards. A resolved
/// value is written into the field slot. A binding that resolves nowhere
/// keeps its declared default, which is applied as a plain setter.
///
/// Returns the warnings raised for levels declaring the name more than once.
pub fn resolve(arena: &mut ScopeArena, scope: ScopeId) -> Vec<InflateError> {
    let bindings = arena.get(scope).bindings().to_vec();
    let mut warnings: Vec<InflateError> = Vec::new();

    for binding in bindings {
        let mut resolved: Option<Value> = None;

        for (_, frame) in arena.ancestors(scope) {
            let mut matches = frame
                .variables()
                .iter()
                .filter(|(name, _)| *name == binding.observed);
            let Some((_, first)) = matches.next() else {
                continue;
            };
            if matches.next().is_some() {
                let warning = InflateError::DuplicateVariable {
                    spec: frame.spec_name().to_string(),
                    name: binding.observed.clone(),
                };
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
            if !first.is_null() {
                debug!(
                    field = %binding.field,
                    observed = %binding.observed,
                    from = frame.spec_name(),
                    "Binding resolved"
                );
                resolved = Some(first.clone());
                break;
            }
        }

        let frame = arena.get_mut(scope);
        match resolved {
            Some(value) => {
                if let Some(slot) = frame.field_mut(&binding.field) {
                    slot.value = value;
                }
            }
            None => {
                let Some(slot) = frame.fields().iter().find(|f| f.name == binding.field) else {
                    continue;
                };
                debug!(
                    field = %binding.field,
                    observed = %binding.observed,
                    "Binding unresolved, applying declared default"
                );
                let call = plain_setter(&slot.name, slot.ty.clone(), slot.value.clone());
                frame.setters.insert(call.method.clone(), call);
            }
        }
    }

    warnings
}
