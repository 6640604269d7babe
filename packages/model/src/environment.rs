use crate::error::HostError;
use crate::geometry::LayoutParams;
use crate::object::ObjectRef;
use crate::registry::MethodRegistry;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Coarse orientation lock a root specification may request from its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationLock {
    /// Rotate freely between all four orientations
    FullSensor,
    /// Either landscape orientation
    SensorLandscape,
    /// Either portrait orientation
    SensorPortrait,
    Portrait,
    ReversePortrait,
    Landscape,
    ReverseLandscape,
}

/// The host an inflation pass builds into.
///
/// The engine consumes exactly these capabilities: constructing an object of
/// a named kind, locking the orientation, resolving a named declarative
/// resource, and the method table used to configure what it constructed.
pub trait Environment {
    fn methods(&self) -> &MethodRegistry;

    fn construct(&self, kind: &str, layout: &LayoutParams) -> Result<ObjectRef, HostError>;

    fn request_orientation(&self, lock: OrientationLock);

    fn load_resource(&self, name: &str) -> Result<ObjectRef, HostError>;
}

/// What a computed field initializer can see while its node is classified
pub trait InitScope {
    fn environment(&self) -> &dyn Environment;

    /// Value of a field declared earlier in the same specification
    fn field(&self, name: &str) -> Option<Value>;

    /// Value exported under `name` by the nearest frame on the current path
    fn variable(&self, name: &str) -> Option<Value>;
}
