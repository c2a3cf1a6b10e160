//! Viewpoint control for the starfield scene.
//!
//! A single per-tick controller derives the camera pose from the
//! interaction state: easing home, easing onto a focused body, or mapping
//! the pointer directly while free-looking.

/// Scene camera marker, pose math, and the per-tick controller system.
pub mod scene_camera;
