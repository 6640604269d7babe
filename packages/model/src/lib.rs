//! # Trellis Model
//!
//! Data model shared by the inflation engine and its hosts: specification
//! nodes and their markers, runtime values, live objects, and the host
//! contracts ([`Environment`], [`MethodRegistry`]) the engine builds against.

pub mod document;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod object;
pub mod registry;
pub mod spec;
pub mod value;
pub mod visitor;

pub use document::{SpecCatalog, SpecDocument};
pub use environment::{Environment, InitScope, OrientationLock};
pub use error::{HostError, ModelError, ModelResult};
pub use geometry::{Axis, LayoutParams, Origin, Padding, Sizing};
pub use object::{ObjectRef, ObjectSnapshot};
pub use registry::{accessor_name, KindDescriptor, Method, MethodRegistry, Signature};
pub use spec::{
    AdapterMarker, EmbedMarker, FieldDecl, FieldRole, FieldSlot, HookContext, Initializer,
    InvisibleMarker, LayoutMarker, Marker, Orientation, ResourceMarker, Specification,
    StaticMethod, DEFAULT_COMPLETION_HOOK,
};
pub use value::{display_signature, signature_of, ParamType, Value};
pub use visitor::{walk_document, walk_specification, SpecVisitor};
