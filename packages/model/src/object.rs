//! Live objects produced by an inflation pass.
//!
//! An [`Object`] is a property bag with an identity, a kind name and (for
//! container kinds) an ordered list of children. Hosts attach behavior to a
//! kind through the [`MethodRegistry`](crate::registry::MethodRegistry); the
//! engine never touches properties directly.

use crate::error::HostError;
use crate::geometry::LayoutParams;
use crate::value::Value;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub struct Object {
    id: u64,
    kind: String,
    container: bool,
    state: RefCell<ObjectState>,
}

#[derive(Default)]
struct ObjectState {
    props: BTreeMap<String, Value>,
    children: Vec<ObjectRef>,
    layout: LayoutParams,
}

/// Shared handle to a live object. Equality is identity.
#[derive(Clone)]
pub struct ObjectRef(Rc<Object>);

impl ObjectRef {
    pub fn new(id: u64, kind: impl Into<String>, container: bool) -> Self {
        ObjectRef(Rc::new(Object {
            id,
            kind: kind.into(),
            container,
            state: RefCell::new(ObjectState::default()),
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    pub fn is_container(&self) -> bool {
        self.0.container
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn prop(&self, name: &str) -> Option<Value> {
        self.0.state.borrow().props.get(name).cloned()
    }

    pub fn set_prop(&self, name: impl Into<String>, value: Value) {
        self.0.state.borrow_mut().props.insert(name.into(), value);
    }

    pub fn props(&self) -> BTreeMap<String, Value> {
        self.0.state.borrow().props.clone()
    }

    pub fn layout(&self) -> LayoutParams {
        self.0.state.borrow().layout
    }

    pub fn set_layout(&self, layout: LayoutParams) {
        self.0.state.borrow_mut().layout = layout;
    }

    pub fn update_layout(&self, f: impl FnOnce(&mut LayoutParams)) {
        f(&mut self.0.state.borrow_mut().layout);
    }

    pub fn add_child(&self, child: ObjectRef) -> Result<(), HostError> {
        if !self.0.container {
            return Err(HostError::NotAContainer {
                kind: self.0.kind.clone(),
            });
        }
        self.0.state.borrow_mut().children.push(child);
        Ok(())
    }

    pub fn children(&self) -> Vec<ObjectRef> {
        self.0.state.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.state.borrow().children.len()
    }

    /// Depth-first search for an object whose `id` property equals `id`
    pub fn find_by_id(&self, id: i32) -> Option<ObjectRef> {
        if self.prop("id").and_then(|v| v.as_i32()) == Some(id) {
            return Some(self.clone());
        }
        self.children().iter().find_map(|child| child.find_by_id(id))
    }

    pub fn snapshot(&self) -> ObjectSnapshot {
        let state = self.0.state.borrow();
        ObjectSnapshot {
            id: self.0.id,
            kind: self.0.kind.clone(),
            layout: state.layout,
            props: state
                .props
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
            children: state.children.iter().map(ObjectRef::snapshot).collect(),
        }
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.0.kind, self.0.id)
    }
}

/// Serializable copy of a live tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSnapshot {
    pub id: u64,
    pub kind: String,
    pub layout: LayoutParams,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ObjectSnapshot>,
}
