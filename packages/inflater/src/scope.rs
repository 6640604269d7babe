//! Scope frames: the per-node accumulator of an inflation pass.
//!
//! Frames live in a [`ScopeArena`] owned by the pass and point at their
//! parent by index. A frame's parent is fixed when the frame is pushed and
//! always refers to an earlier frame, so every chain ends at a root.

use indexmap::IndexMap;
use trellis_model::{FieldSlot, ObjectRef, ParamType, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A method invocation recorded during classification and run once the
/// target object exists
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredCall {
    pub method: String,
    pub params: Vec<ParamType>,
    pub args: Vec<Value>,
}

/// A field waiting for a value exported by an enclosing frame
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBinding {
    pub field: String,
    pub observed: String,
}

#[derive(Debug)]
pub struct ScopeFrame {
    spec: String,
    parent: Option<ScopeId>,
    depth: usize,
    pub(crate) fields: Vec<FieldSlot>,
    /// Declaration order; repeated names are kept so lookups see the first one
    pub(crate) variables: Vec<(String, Value)>,
    pub(crate) bindings: Vec<PendingBinding>,
    /// Keyed by method name
    pub(crate) setters: IndexMap<String, DeferredCall>,
    /// Keyed by field name, then method name
    pub(crate) getters: IndexMap<String, IndexMap<String, DeferredCall>>,
    /// Objects (or entities) produced by nested specifications with their
    /// specification names, in dispatch order; names may repeat
    pub(crate) children: Vec<(String, ObjectRef)>,
    pub(crate) object: Option<ObjectRef>,
    sealed: bool,
}

impl ScopeFrame {
    fn new(spec: &str, parent: Option<ScopeId>, depth: usize) -> Self {
        Self {
            spec: spec.to_string(),
            parent,
            depth,
            fields: Vec::new(),
            variables: Vec::new(),
            bindings: Vec::new(),
            setters: IndexMap::new(),
            getters: IndexMap::new(),
            children: Vec::new(),
            object: None,
            sealed: false,
        }
    }

    pub fn spec_name(&self) -> &str {
        &self.spec
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn fields(&self) -> &[FieldSlot] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldSlot> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn variables(&self) -> &[(String, Value)] {
        &self.variables
    }

    /// First declaration of `name` in this frame
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn bindings(&self) -> &[PendingBinding] {
        &self.bindings
    }

    pub fn setters(&self) -> &IndexMap<String, DeferredCall> {
        &self.setters
    }

    pub fn getters(&self) -> &IndexMap<String, IndexMap<String, DeferredCall>> {
        &self.getters
    }

    pub fn children(&self) -> &[(String, ObjectRef)] {
        &self.children
    }

    /// First object produced by a nested specification named `spec`
    pub fn child(&self, spec: &str) -> Option<&ObjectRef> {
        self.children
            .iter()
            .find(|(name, _)| name == spec)
            .map(|(_, object)| object)
    }

    pub fn object(&self) -> Option<&ObjectRef> {
        self.object.as_ref()
    }

    /// Set once the node is configured and its completion hook has run
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

/// Every frame of one inflation pass
#[derive(Debug, Default)]
pub struct ScopeArena {
    frames: Vec<ScopeFrame>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spec: &str, parent: Option<ScopeId>) -> ScopeId {
        let depth = match parent {
            Some(p) => {
                debug_assert!(p.0 < self.frames.len(), "parent frame must already exist");
                self.frames[p.0].depth + 1
            }
            None => 0,
        };
        self.frames.push(ScopeFrame::new(spec, parent, depth));
        ScopeId(self.frames.len() - 1)
    }

    pub fn get(&self, id: ScopeId) -> &ScopeFrame {
        &self.frames[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: ScopeId) -> &mut ScopeFrame {
        let frame = &mut self.frames[id.0];
        debug_assert!(!frame.sealed, "frame '{}' mutated after sealing", frame.spec);
        frame
    }

    pub(crate) fn seal(&mut self, id: ScopeId) {
        self.frames[id.0].sealed = true;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn frames(&self) -> impl Iterator<Item = (ScopeId, &ScopeFrame)> {
        self.frames.iter().enumerate().map(|(i, f)| (ScopeId(i), f))
    }

    /// First frame created for the named specification
    pub fn find_frame(&self, spec: &str) -> Option<&ScopeFrame> {
        self.frames.iter().find(|f| f.spec == spec)
    }

    /// `id`, then its parent, then the parent's parent, up to the root
    pub fn ancestors(&self, id: ScopeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    /// Nearest non-null value exported under `name`, starting at `id`
    pub fn lookup_variable(&self, id: ScopeId, name: &str) -> Option<(ScopeId, Value)> {
        self.ancestors(id).find_map(|(scope, frame)| match frame.variable(name) {
            Some(value) if !value.is_null() => Some((scope, value.clone())),
            _ => None,
        })
    }

    /// Object produced by the nested specification `spec`, searched from `id` upwards
    pub fn find_child(&self, id: ScopeId, spec: &str) -> Option<ObjectRef> {
        self.ancestors(id)
            .find_map(|(_, frame)| frame.child(spec).cloned())
    }
}

pub struct Ancestors<'a> {
    arena: &'a ScopeArena,
    next: Option<ScopeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (ScopeId, &'a ScopeFrame);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let frame = self.arena.get(id);
        self.next = frame.parent;
        Some((id, frame))
    }
}
