//! Specification nodes: the static description of one object to build.

use crate::environment::{Environment, InitScope};
use crate::geometry::{Axis, Origin, Sizing};
use crate::object::ObjectRef;
use crate::value::{ParamType, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Name under which a completion hook is recognized unless configured otherwise
pub const DEFAULT_COMPLETION_HOOK: &str = "onLayoutComplete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    pub fn all() -> Vec<Orientation> {
        vec![
            Orientation::Portrait,
            Orientation::PortraitUpsideDown,
            Orientation::LandscapeLeft,
            Orientation::LandscapeRight,
        ]
    }
}

fn default_kind() -> String {
    "frame".to_string()
}

fn default_padding() -> Vec<i32> {
    vec![0, 0, 0, 0]
}

/// Construct an object of a named kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMarker {
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub width: Sizing,
    #[serde(default)]
    pub height: Sizing,
    /// One value for all sides, or left, top, right, bottom
    #[serde(default = "default_padding")]
    pub padding: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    /// Only honored on the root specification
    #[serde(default = "Orientation::all")]
    pub orientation: Vec<Orientation>,
}

impl Default for LayoutMarker {
    fn default() -> Self {
        Self::new(default_kind())
    }
}

impl LayoutMarker {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            origin: Origin::default(),
            width: Sizing::Wrap,
            height: Sizing::Wrap,
            padding: default_padding(),
            axis: None,
            orientation: Orientation::all(),
        }
    }

    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Origin::new(x, y);
        self
    }

    pub fn size(mut self, width: Sizing, height: Sizing) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn padding(mut self, padding: Vec<i32>) -> Self {
        self.padding = padding;
        self
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn orientation(mut self, orientation: Vec<Orientation>) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Adopt the object built from another named specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedMarker {
    pub layout: String,
}

/// Build a non-visual entity of a named kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvisibleMarker {
    pub kind: String,
}

/// Ask a factory object of a named kind for the object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterMarker {
    pub kind: String,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub width: Sizing,
    #[serde(default)]
    pub height: Sizing,
    /// Configure the factory before asking it for the object
    #[serde(default)]
    pub setters_first: bool,
}

impl AdapterMarker {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            origin: Origin::default(),
            width: Sizing::Wrap,
            height: Sizing::Wrap,
            setters_first: false,
        }
    }

    pub fn setters_first(mut self) -> Self {
        self.setters_first = true;
        self
    }
}

/// Load a pre-built object from a named declarative resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMarker {
    pub resource: String,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub width: Sizing,
    #[serde(default)]
    pub height: Sizing,
    #[serde(default = "Orientation::all")]
    pub orientation: Vec<Orientation>,
}

impl ResourceMarker {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            origin: Origin::default(),
            width: Sizing::Wrap,
            height: Sizing::Wrap,
            orientation: Orientation::all(),
        }
    }

    pub fn orientation(mut self, orientation: Vec<Orientation>) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Primary metadata marker of a specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Marker {
    Layout(LayoutMarker),
    Embed(EmbedMarker),
    Invisible(InvisibleMarker),
    Adapter(AdapterMarker),
    Resource(ResourceMarker),
    /// Handled by a builder registered under `{name}Builder`
    Custom {
        name: String,
        #[serde(default)]
        attributes: BTreeMap<String, Value>,
    },
    /// Metadata the engine does not interpret
    Foreign { name: String },
}

impl Marker {
    /// Marker type name; builder identifiers are derived from it
    pub fn type_name(&self) -> &str {
        match self {
            Marker::Layout(_) => "Layout",
            Marker::Embed(_) => "Embed",
            Marker::Invisible(_) => "Invisible",
            Marker::Adapter(_) => "LayoutAdapter",
            Marker::Resource(_) => "XmlLayout",
            Marker::Custom { name, .. } => name,
            Marker::Foreign { name } => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Marker::Foreign { .. })
    }
}

/// Role marker on a declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Publish the value for descendant bindings
    Variable,
    /// Take the value exported under `observed` by the nearest frame
    Binding { observed: String },
    /// Call a getter after construction and store its result in the field
    Getter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,
    },
    /// Call `set{Name}` with the list value spread as arguments
    Setter,
}

impl FieldRole {
    pub fn label(&self) -> &'static str {
        match self {
            FieldRole::Variable => "variable",
            FieldRole::Binding { .. } => "binding",
            FieldRole::Getter { .. } => "getter",
            FieldRole::Setter => "setter",
        }
    }
}

type InitFn = dyn Fn(&dyn InitScope) -> Value;

/// Computed field initializer, evaluated when the field is classified
#[derive(Clone)]
pub struct Initializer(Rc<InitFn>);

impl Initializer {
    pub fn new(f: impl Fn(&dyn InitScope) -> Value + 'static) -> Self {
        Initializer(Rc::new(f))
    }

    pub fn evaluate(&self, scope: &dyn InitScope) -> Value {
        (self.0)(scope)
    }
}

impl fmt::Debug for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Initializer")
    }
}

/// A declared field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<FieldRole>,
    /// Declared type; plain setters are matched with it when present
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<ParamType>,
    #[serde(default)]
    pub value: Value,
    #[serde(skip)]
    pub init: Option<Initializer>,
}

impl FieldDecl {
    pub fn plain(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            role: None,
            ty: None,
            value: value.into(),
            init: None,
        }
    }

    pub fn variable(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::plain(name, value).role(FieldRole::Variable)
    }

    pub fn binding(name: impl Into<String>, observed: impl Into<String>, default: impl Into<Value>) -> Self {
        Self::plain(name, default).role(FieldRole::Binding {
            observed: observed.into(),
        })
    }

    pub fn getter(name: impl Into<String>, params: Vec<Value>) -> Self {
        Self::plain(name, Value::List(params)).role(FieldRole::Getter { method: None })
    }

    pub fn getter_named(name: impl Into<String>, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self::plain(name, Value::List(params)).role(FieldRole::Getter {
            method: Some(method.into()),
        })
    }

    pub fn setter(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::plain(name, value).role(FieldRole::Setter)
    }

    pub fn role(mut self, role: FieldRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn typed(mut self, ty: ParamType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Replace the literal value with an initializer
    pub fn computed(mut self, f: impl Fn(&dyn InitScope) -> Value + 'static) -> Self {
        self.init = Some(Initializer::new(f));
        self
    }
}

/// Current value of a field during and after inflation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSlot {
    pub name: String,
    /// Declared type, or the runtime type of the initial value
    #[serde(rename = "type")]
    pub ty: ParamType,
    pub value: Value,
}

/// Arguments handed to a completion hook
pub struct HookContext<'a> {
    pub env: &'a dyn Environment,
    /// Constructed object, or the entity for non-visual specifications
    pub object: Option<&'a ObjectRef>,
    pub fields: &'a [FieldSlot],
}

impl HookContext<'_> {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|slot| slot.name == name).map(|slot| &slot.value)
    }
}

type HookFn = dyn Fn(&HookContext<'_>);

/// Static function declared on a specification
#[derive(Clone)]
pub struct StaticMethod {
    pub name: String,
    hook: Rc<HookFn>,
}

impl StaticMethod {
    pub fn new(name: impl Into<String>, f: impl Fn(&HookContext<'_>) + 'static) -> Self {
        Self {
            name: name.into(),
            hook: Rc::new(f),
        }
    }

    pub fn call(&self, cx: &HookContext<'_>) {
        (self.hook)(cx)
    }
}

impl fmt::Debug for StaticMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticMethod({})", self.name)
    }
}

/// Declarative description of one object, its configuration and its nested specifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub nested: Vec<Specification>,
    #[serde(skip)]
    pub statics: Vec<StaticMethod>,
}

impl Specification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            fields: Vec::new(),
            nested: Vec::new(),
            statics: Vec::new(),
        }
    }

    pub fn layout(name: impl Into<String>, marker: LayoutMarker) -> Self {
        Self::new(name).marker(Marker::Layout(marker))
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn nest(mut self, child: Specification) -> Self {
        self.nested.push(child);
        self
    }

    pub fn static_method(mut self, name: impl Into<String>, f: impl Fn(&HookContext<'_>) + 'static) -> Self {
        self.statics.push(StaticMethod::new(name, f));
        self
    }

    pub fn on_layout_complete(self, f: impl Fn(&HookContext<'_>) + 'static) -> Self {
        self.static_method(DEFAULT_COMPLETION_HOOK, f)
    }

    /// First marker the engine recognizes
    pub fn primary_marker(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.is_recognized())
    }

    pub fn find_static(&self, name: &str) -> Option<&StaticMethod> {
        self.statics.iter().find(|m| m.name == name)
    }
}
