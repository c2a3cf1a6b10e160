use bevy::prelude::*;

/// Resting pose of the viewpoint, looking at the scene origin.
pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Fraction of the remaining distance covered per tick while easing.
pub const CAMERA_LERP_FACTOR: f32 = 0.1;

/// Distance below which an eased motion counts as arrived.
pub const CONVERGENCE_EPSILON: f32 = 0.01;

/// Offset from a focused body along the viewing axis.
pub const FOCUS_VIEW_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 2.0);

/// Radians of yaw/pitch per unit of normalized pointer travel.
pub const FREE_LOOK_SENSITIVITY: f32 = 0.3;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
