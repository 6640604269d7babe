//! Capability-indexed method registry.
//!
//! Each object kind registers its invocable methods once, keyed by name and
//! parameter signature. Deferred setters and getters are resolved against
//! this table instead of a reflective runtime.

use crate::error::HostError;
use crate::object::ObjectRef;
use crate::value::{ParamType, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type Signature = Vec<ParamType>;

type MethodFn = dyn Fn(&ObjectRef, &[Value]) -> Result<Value, HostError>;

/// Invocable method handle
#[derive(Clone)]
pub struct Method(Rc<MethodFn>);

impl Method {
    pub fn new(f: impl Fn(&ObjectRef, &[Value]) -> Result<Value, HostError> + 'static) -> Self {
        Method(Rc::new(f))
    }

    pub fn invoke(&self, target: &ObjectRef, args: &[Value]) -> Result<Value, HostError> {
        (self.0)(target, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method")
    }
}

/// `set` + `Text` for field `text`
pub fn accessor_name(prefix: &str, field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

/// Methods and traits of one object kind
#[derive(Debug, Clone)]
pub struct KindDescriptor {
    name: String,
    base: Option<String>,
    container: bool,
    methods: HashMap<String, Vec<(Signature, Method)>>,
}

impl KindDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            container: false,
            methods: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Inherit every method of `base` that this kind does not override
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn container(mut self) -> Self {
        self.container = true;
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        signature: Signature,
        f: impl Fn(&ObjectRef, &[Value]) -> Result<Value, HostError> + 'static,
    ) -> Self {
        let overloads = self.methods.entry(name.into()).or_default();
        overloads.retain(|(sig, _)| *sig != signature);
        overloads.push((signature, Method::new(f)));
        self
    }

    /// Registers a `setX(ty)` / `getX()` pair backed by the object's property `x`
    pub fn property(self, prop: &str, ty: ParamType) -> Self {
        let set_prop = prop.to_string();
        let get_prop = prop.to_string();
        self.method(accessor_name("set", prop), vec![ty], move |obj, args| {
            obj.set_prop(set_prop.clone(), args.first().cloned().unwrap_or_default());
            Ok(Value::Null)
        })
        .method(accessor_name("get", prop), vec![], move |obj, _| {
            Ok(obj.prop(&get_prop).unwrap_or_default())
        })
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn overloads(&self, name: &str) -> &[(Signature, Method)] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Registry of every kind a host can construct
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    kinds: HashMap<String, KindDescriptor>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: KindDescriptor) {
        self.kinds.insert(kind.name.clone(), kind);
    }

    pub fn kind(&self, name: &str) -> Option<&KindDescriptor> {
        self.kinds.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// The kind followed by its bases, nearest first. Stops on a repeated kind.
    pub fn lineage(&self, kind: &str) -> Vec<&KindDescriptor> {
        let mut chain: Vec<&KindDescriptor> = Vec::new();
        let mut current = self.kinds.get(kind);
        while let Some(desc) = current {
            if chain.iter().any(|seen| seen.name == desc.name) {
                break;
            }
            chain.push(desc);
            current = desc.base.as_deref().and_then(|b| self.kinds.get(b));
        }
        chain
    }

    pub fn is_container(&self, kind: &str) -> bool {
        self.lineage(kind).iter().any(|desc| desc.container)
    }

    /// Whether `kind` is `ancestor` or extends it
    pub fn is_kind_of(&self, kind: &str, ancestor: &str) -> bool {
        kind == ancestor || self.lineage(kind).iter().any(|desc| desc.name == ancestor)
    }

    /// Whether an argument of type `arg` may be passed where `param` is declared
    pub fn is_assignable(&self, arg: &ParamType, param: &ParamType) -> bool {
        match (arg, param) {
            (_, ParamType::Any) => true,
            (ParamType::Any, _) => true,
            (ParamType::Object(from), ParamType::Object(to)) => self.is_kind_of(from, to),
            (a, p) => a == p,
        }
    }

    /// Resolves `name` with the given argument types on `kind`.
    ///
    /// Each kind in the lineage is checked for an exact signature first, then
    /// for an overload whose parameters accept the arguments.
    pub fn resolve(&self, kind: &str, name: &str, signature: &[ParamType]) -> Option<&Method> {
        for desc in self.lineage(kind) {
            let overloads = desc.overloads(name);
            if let Some((_, method)) = overloads.iter().find(|(sig, _)| sig.as_slice() == signature) {
                return Some(method);
            }
            let compatible = overloads.iter().find(|(sig, _)| {
                sig.len() == signature.len()
                    && sig
                        .iter()
                        .zip(signature)
                        .all(|(param, arg)| self.is_assignable(arg, param))
            });
            if let Some((_, method)) = compatible {
                return Some(method);
            }
        }
        None
    }

    pub fn has_method(&self, kind: &str, name: &str) -> bool {
        self.lineage(kind).iter().any(|desc| desc.has_method(name))
    }
}
