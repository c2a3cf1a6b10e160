// Standard library and external crates
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::PresentMode;

// Crate engine modules
use crate::engine::{
    camera::scene_camera::camera_controller,
    core::diagnostics::{fps_text_update_system, spawn_fps_text},
    scene::{
        animation::{advance_orbits, pulse_glow_points, spin_bodies},
        catalog::SceneCatalog,
        spawn::setup_scene,
    },
};

// Crate tools modules
use crate::tools::{
    interaction::{
        GoHomeEvent, InteractionState, SelectEntityEvent, SetModeEvent, apply_go_home_events,
        apply_selection_events, apply_set_mode_events, handle_interaction_shortcuts,
    },
    overlay::{
        handle_go_home_button, handle_mode_toggle_button, reflect_mode_toggle_label,
        reflect_selection_overlay, spawn_overlay,
    },
    picking::select_on_click,
    pointer_tracker::{PointerSample, track_pointer},
};

use crate::rpc::web_rpc::WebRpcPlugin;

/// Assemble the application: plugins, state resources, interaction events,
/// and the per-frame schedule.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WebRpcPlugin);

    app.init_resource::<PointerSample>()
        .init_resource::<InteractionState>()
        .insert_resource(SceneCatalog::from_declarations())
        .add_event::<SelectEntityEvent>()
        .add_event::<GoHomeEvent>()
        .add_event::<SetModeEvent>()
        .add_systems(Startup, (setup_scene, spawn_overlay, spawn_fps_text))
        .add_systems(
            Update,
            (
                track_pointer,
                select_on_click,
                handle_go_home_button,
                handle_mode_toggle_button,
                handle_interaction_shortcuts,
                apply_set_mode_events,
                apply_go_home_events,
                apply_selection_events,
                camera_controller,
            )
                .chain(),
        )
        .add_systems(Update, (advance_orbits, spin_bodies, pulse_glow_points))
        .add_systems(
            Update,
            (
                reflect_selection_overlay,
                reflect_mode_toggle_label,
                fps_text_update_system,
            ),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    DefaultPlugins.set(window_config)
}

fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
