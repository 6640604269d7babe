use crate::error::{InflateError, InflateResult};
use std::collections::HashSet;
use trellis_model::{Orientation, OrientationLock};

/// Maps the orientations a root specification allows to the lock the host
/// should apply.
///
/// Only sets with an exact lock are satisfiable: all four orientations, both
/// landscapes, both portraits, or a single orientation. Anything else
/// (including the empty set) is rejected.
pub fn orientation_lock(spec: &str, allowed: &[Orientation]) -> InflateResult<OrientationLock> {
    use Orientation::*;

    let set: HashSet<Orientation> = allowed.iter().copied().collect();
    let has = |o: Orientation| set.contains(&o);

    let lock = match set.len() {
        4 => Some(OrientationLock::FullSensor),
        2 if has(LandscapeLeft) && has(LandscapeRight) => Some(OrientationLock::SensorLandscape),
        2 if has(Portrait) && has(PortraitUpsideDown) => Some(OrientationLock::SensorPortrait),
        1 if has(Portrait) => Some(OrientationLock::Portrait),
        1 if has(PortraitUpsideDown) => Some(OrientationLock::ReversePortrait),
        1 if has(LandscapeRight) => Some(OrientationLock::Landscape),
        1 if has(LandscapeLeft) => Some(OrientationLock::ReverseLandscape),
        _ => None,
    };

    lock.ok_or_else(|| InflateError::UnsatisfiableOrientation {
        spec: spec.to_string(),
        requested: allowed.to_vec(),
    })
}
