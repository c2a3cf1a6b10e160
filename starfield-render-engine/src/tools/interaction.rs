use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::scene::catalog::{EntityId, SceneCatalog};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::picking::Selectable;

/// Input mode governing the camera while nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Orientation tracks the pointer directly.
    FreeLook,
    /// Pose is frozen; pointer input is ignored.
    Fixed,
}

impl InputMode {
    /// Convert string identifier to input mode for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free_look" => Some(Self::FreeLook),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }

    /// Convert input mode to string identifier for frontend communication.
    pub fn to_string(&self) -> &'static str {
        match self {
            Self::FreeLook => "free_look",
            Self::Fixed => "fixed",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::FreeLook => Self::Fixed,
            Self::Fixed => Self::FreeLook,
        }
    }
}

/// A selected body together with its world position sampled at selection
/// time. The position is deliberately frozen; a still-orbiting body is not
/// tracked afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub id: EntityId,
    pub world_position: Vec3,
}

/// Operative regime derived from the interaction state each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regime {
    Homing,
    Focused { target: Vec3 },
    Idle,
}

/// Authoritative interaction state: current selection, the returning-home
/// flag, and the input mode. All writes go through the transition methods
/// below, which keep `selected` and `returning_home` mutually exclusive.
#[derive(Resource, Debug)]
pub struct InteractionState {
    selected: Option<Selection>,
    returning_home: bool,
    mode: InputMode,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            selected: None,
            returning_home: false,
            mode: InputMode::FreeLook,
        }
    }
}

impl InteractionState {
    /// Focus a body. Cancels any homing motion in flight. Re-selecting the
    /// currently selected id changes nothing, including the sampled
    /// position. Returns whether the state changed.
    pub fn select(&mut self, id: EntityId, world_position: Vec3) -> bool {
        if self.selected.is_some_and(|s| s.id == id) {
            return false;
        }
        self.selected = Some(Selection { id, world_position });
        self.returning_home = false;
        true
    }

    /// Clear the selection and start easing back to the home pose. Harmless
    /// when already idle: the camera is converged, so the controller ends
    /// the homing regime on its next tick.
    pub fn go_home(&mut self) {
        self.selected = None;
        self.returning_home = true;
    }

    /// Change the input mode. Leaving free-look forces a return home so the
    /// camera cannot stay frozen mid-focus or mid-pan. Returns whether the
    /// mode changed.
    pub fn set_mode(&mut self, mode: InputMode) -> bool {
        if self.mode == mode {
            return false;
        }
        let leaving_free_look = self.mode == InputMode::FreeLook && mode == InputMode::Fixed;
        self.mode = mode;
        if leaving_free_look {
            self.go_home();
        }
        true
    }

    /// Called by the camera controller once it has converged on home.
    pub fn finish_homing(&mut self) {
        self.returning_home = false;
    }

    pub fn regime(&self) -> Regime {
        if self.returning_home {
            Regime::Homing
        } else if let Some(selection) = self.selected {
            Regime::Focused {
                target: selection.world_position,
            }
        } else {
            Regime::Idle
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected.map(|s| s.id)
    }

    pub fn is_returning_home(&self) -> bool {
        self.returning_home
    }
}

/// Where an interaction request came from, for logging.
#[derive(Debug, Clone, Copy)]
pub enum InteractionSource {
    Pointer,
    Ui,
    Keyboard,
    Rpc,
}

/// Uniform entry point for focusing a body. The hit-test layer supplies the
/// sampled world position; RPC requests leave it out and the live transform
/// is looked up instead.
#[derive(Event)]
pub struct SelectEntityEvent {
    pub id: EntityId,
    pub world_position: Option<Vec3>,
    pub source: InteractionSource,
}

#[derive(Event)]
pub struct GoHomeEvent {
    pub source: InteractionSource,
}

#[derive(Event)]
pub struct SetModeEvent {
    pub mode: InputMode,
    pub source: InteractionSource,
}

pub fn apply_set_mode_events(
    mut events: EventReader<SetModeEvent>,
    mut state: ResMut<InteractionState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let had_selection = state.selected_id().is_some();
        if state.set_mode(event.mode) {
            info!("Input mode set to {} via {:?}", event.mode.to_string(), event.source);
            rpc_interface.send_notification(
                "mode_changed",
                serde_json::json!({ "mode": event.mode.to_string() }),
            );
            // Leaving free-look clears any selection as a side effect.
            if had_selection && state.selected_id().is_none() {
                rpc_interface.send_notification("selection_changed", serde_json::Value::Null);
            }
        }
    }
}

pub fn apply_go_home_events(
    mut events: EventReader<GoHomeEvent>,
    mut state: ResMut<InteractionState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let had_selection = state.selected_id().is_some();
        state.go_home();
        info!("Returning home via {:?}", event.source);
        if had_selection {
            rpc_interface.send_notification("selection_changed", serde_json::Value::Null);
        }
    }
}

pub fn apply_selection_events(
    mut events: EventReader<SelectEntityEvent>,
    mut state: ResMut<InteractionState>,
    selectables: Query<(&Selectable, &GlobalTransform)>,
    catalog: Res<SceneCatalog>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let position = event
            .world_position
            .or_else(|| live_position(&selectables, event.id));
        let Some(position) = position else {
            warn!("No live body found for entity id {}", event.id);
            continue;
        };
        if state.select(event.id, position) {
            let info = catalog.describe(event.id);
            info!("Selected {} via {:?}", event.id, event.source);
            rpc_interface.send_notification(
                "selection_changed",
                serde_json::json!({
                    "id": event.id,
                    "title": info.title,
                    "description": info.description,
                }),
            );
        }
    }
}

fn live_position(
    selectables: &Query<(&Selectable, &GlobalTransform)>,
    id: EntityId,
) -> Option<Vec3> {
    selectables
        .iter()
        .find(|(selectable, _)| selectable.id == id)
        .map(|(_, transform)| transform.translation())
}

/// Keyboard shortcuts for native builds: Escape returns home, L toggles the
/// input mode.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_interaction_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<InteractionState>,
    mut go_home_events: EventWriter<GoHomeEvent>,
    mut mode_events: EventWriter<SetModeEvent>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        go_home_events.write(GoHomeEvent {
            source: InteractionSource::Keyboard,
        });
    }
    if keyboard.just_pressed(KeyCode::KeyL) {
        mode_events.write(SetModeEvent {
            mode: state.mode().toggled(),
            source: InteractionSource::Keyboard,
        });
    }
}

/// Placeholder for WASM builds where the embedding page drives everything
/// over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_interaction_shortcuts() {}
