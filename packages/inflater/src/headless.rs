//! In-memory host environment.
//!
//! Objects are plain property bags; every method is registered through the
//! [`MethodRegistry`]. Used by the CLI and the test suites, and as a template
//! for real hosts.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;
use trellis_model::{
    Environment, HostError, KindDescriptor, LayoutParams, MethodRegistry, ObjectRef,
    OrientationLock, Origin, Padding, ParamType, Value,
};

type ResourceFn = dyn Fn(&HeadlessEnvironment) -> Result<ObjectRef, HostError>;

/// Shared id source, also captured by methods that create objects
#[derive(Debug, Clone, Default)]
struct IdSource(Rc<Cell<u64>>);

impl IdSource {
    fn next(&self) -> u64 {
        let id = self.0.get() + 1;
        self.0.set(id);
        id
    }
}

#[derive(Default)]
pub struct HeadlessEnvironment {
    registry: MethodRegistry,
    resources: HashMap<String, Rc<ResourceFn>>,
    ids: IdSource,
    orientation_requests: RefCell<Vec<OrientationLock>>,
    constructed: RefCell<Vec<String>>,
}

impl HeadlessEnvironment {
    /// Environment with no kinds registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment with the standard widget kinds: `view`, `frame`, `linear`,
    /// `text`, `button`, `image`, plus the `adapter` factory and the
    /// non-visual `sound` entity
    pub fn with_standard_kinds() -> Self {
        let mut env = Self::new();
        for kind in standard_kinds(&env.ids) {
            env.register_kind(kind);
        }
        env
    }

    pub fn register_kind(&mut self, kind: KindDescriptor) {
        self.registry.register(kind);
    }

    pub fn registry_mut(&mut self) -> &mut MethodRegistry {
        &mut self.registry
    }

    /// Registers a resource built by `f` each time it is loaded
    pub fn add_resource(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&HeadlessEnvironment) -> Result<ObjectRef, HostError> + 'static,
    ) {
        self.resources.insert(name.into(), Rc::new(f));
    }

    /// Registers a resource that loads as a fresh object of `kind`
    pub fn add_resource_kind(&mut self, name: impl Into<String>, kind: impl Into<String>) {
        let kind = kind.into();
        self.add_resource(name, move |env| env.create(&kind));
    }

    /// Constructs `kind` with default layout parameters
    pub fn create(&self, kind: &str) -> Result<ObjectRef, HostError> {
        self.construct(kind, &LayoutParams::default())
    }

    pub fn orientation_requests(&self) -> Vec<OrientationLock> {
        self.orientation_requests.borrow().clone()
    }

    /// Kinds constructed so far, in order
    pub fn constructed_kinds(&self) -> Vec<String> {
        self.constructed.borrow().clone()
    }
}

impl Environment for HeadlessEnvironment {
    fn methods(&self) -> &MethodRegistry {
        &self.registry
    }

    fn construct(&self, kind: &str, layout: &LayoutParams) -> Result<ObjectRef, HostError> {
        if !self.registry.contains(kind) {
            return Err(HostError::unknown_kind(kind));
        }
        let object = ObjectRef::new(self.ids.next(), kind, self.registry.is_container(kind));
        object.set_layout(*layout);
        self.constructed.borrow_mut().push(kind.to_string());
        trace!(object = ?object, "Constructed");
        Ok(object)
    }

    fn request_orientation(&self, lock: OrientationLock) {
        self.orientation_requests.borrow_mut().push(lock);
    }

    fn load_resource(&self, name: &str) -> Result<ObjectRef, HostError> {
        let loader = self
            .resources
            .get(name)
            .ok_or_else(|| HostError::ResourceNotFound {
                name: name.to_string(),
            })?;
        loader(self)
    }
}

fn int_arg(method: &str, args: &[Value], index: usize) -> Result<i32, HostError> {
    args.get(index)
        .and_then(Value::as_i32)
        .ok_or_else(|| HostError::invalid_arguments(method, format!("argument {} is not an int", index)))
}

fn float_arg(method: &str, args: &[Value]) -> Result<f32, HostError> {
    args.first()
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .ok_or_else(|| HostError::invalid_arguments(method, "expected a float"))
}

fn standard_kinds(ids: &IdSource) -> Vec<KindDescriptor> {
    let view = KindDescriptor::new("view")
        .property("id", ParamType::Int)
        .property("tag", ParamType::Any)
        .property("backgroundColor", ParamType::Int)
        .property("visible", ParamType::Bool)
        .property("onClickListener", ParamType::Any)
        .method("setPadding", vec![ParamType::Int; 4], |obj, args| {
            let padding = Padding {
                left: int_arg("setPadding", args, 0)?,
                top: int_arg("setPadding", args, 1)?,
                right: int_arg("setPadding", args, 2)?,
                bottom: int_arg("setPadding", args, 3)?,
            };
            obj.update_layout(|layout| layout.padding = padding);
            Ok(Value::Null)
        })
        .method("setX", vec![ParamType::Float], |obj, args| {
            let x = float_arg("setX", args)?;
            obj.update_layout(|layout| layout.origin = Origin::new(x, layout.origin.y));
            Ok(Value::Null)
        })
        .method("setY", vec![ParamType::Float], |obj, args| {
            let y = float_arg("setY", args)?;
            obj.update_layout(|layout| layout.origin = Origin::new(layout.origin.x, y));
            Ok(Value::Null)
        })
        .method("getChildCount", vec![], |obj, _| {
            Ok(Value::Int(obj.child_count() as i32))
        });

    let adapter_ids = ids.clone();
    let adapter = KindDescriptor::new("adapter")
        .property("label", ParamType::Str)
        .method("getView", vec![], move |adapter, _| {
            let view = ObjectRef::new(adapter_ids.next(), "linear", true);
            view.set_prop("tag", adapter.prop("label").unwrap_or_default());
            Ok(Value::Object(view))
        });

    let sound = KindDescriptor::new("sound")
        .property("source", ParamType::Str)
        .property("volume", ParamType::Float)
        .method("create", vec![], |entity, _| {
            entity.set_prop("created", Value::Bool(true));
            Ok(Value::Null)
        });

    vec![
        view,
        KindDescriptor::new("frame").extends("view").container(),
        KindDescriptor::new("linear").extends("frame"),
        KindDescriptor::new("text")
            .extends("view")
            .property("text", ParamType::Str)
            .property("textColor", ParamType::Int)
            .property("textSize", ParamType::Float),
        KindDescriptor::new("button").extends("text"),
        KindDescriptor::new("image")
            .extends("view")
            .property("source", ParamType::Str),
        adapter,
        sound,
    ]
}
