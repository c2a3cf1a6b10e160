//! Interaction layer for the starfield scene.
//!
//! All mutable interaction state lives in one coordinator resource,
//! `interaction::InteractionState`; every way of driving it funnels through
//! the same three events.
//!
//! ```text
//! Click / UI button / keyboard / RPC
//!   └─> SelectEntityEvent | GoHomeEvent | SetModeEvent
//!       └─> apply_* systems (sole writers of InteractionState)
//!           └─> camera controller reads the derived regime next tick
//! ```
//!
//! ## Modules
//!
//! - `pointer_tracker`: latest normalized pointer sample, overwritten on
//!   every move notification, read once per tick by the camera.
//! - `picking`: cursor-ray hit test over selectable bodies; the single
//!   uniform dispatch point for click-to-focus.
//! - `interaction`: the selection/mode state machine and its transition
//!   events.
//! - `overlay`: the in-engine info panel and mode toggle button.

pub mod interaction;
pub mod overlay;
pub mod picking;
pub mod pointer_tracker;
