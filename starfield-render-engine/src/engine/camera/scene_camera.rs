use bevy::prelude::*;

use constants::camera_settings::{
    CAMERA_LERP_FACTOR, CONVERGENCE_EPSILON, FOCUS_VIEW_OFFSET, FREE_LOOK_SENSITIVITY,
    HOME_POSITION,
};

use crate::tools::interaction::{InputMode, InteractionState, Regime};
use crate::tools::pointer_tracker::PointerSample;

/// Marker for the single scene viewpoint camera.
#[derive(Component)]
pub struct SceneCamera;

/// One easing step: cover a fixed fraction of the remaining distance.
pub fn step_toward(current: Vec3, target: Vec3) -> Vec3 {
    current.lerp(target, CAMERA_LERP_FACTOR)
}

pub fn has_converged(current: Vec3, target: Vec3) -> bool {
    current.distance(target) < CONVERGENCE_EPSILON
}

/// Direct free-look orientation from the latest pointer sample.
pub fn free_look_rotation(sample: Vec2) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        sample.x * FREE_LOOK_SENSITIVITY,
        sample.y * FREE_LOOK_SENSITIVITY,
        0.0,
    )
}

/// Per-tick camera pose update, in priority order: homing, then focus, then
/// idle behavior chosen by the input mode. Position eases; orientation is
/// always set directly. The homing regime is ended here, on the tick the
/// camera crosses the convergence threshold.
pub fn camera_controller(
    time: Res<Time>,
    mut state: ResMut<InteractionState>,
    pointer: Res<PointerSample>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };

    match state.regime() {
        Regime::Homing => {
            if time.delta_secs() <= 0.0 {
                return;
            }
            transform.translation = step_toward(transform.translation, HOME_POSITION);
            transform.look_at(Vec3::ZERO, Vec3::Y);
            if has_converged(transform.translation, HOME_POSITION) {
                state.finish_homing();
            }
        }
        Regime::Focused { target } => {
            if time.delta_secs() <= 0.0 {
                return;
            }
            transform.translation = step_toward(transform.translation, target + FOCUS_VIEW_OFFSET);
            transform.look_at(target, Vec3::Y);
        }
        Regime::Idle => {
            if state.mode() == InputMode::FreeLook {
                transform.rotation = free_look_rotation(pointer.get());
            }
            // Fixed mode: pose stays frozen.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(16);

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.init_resource::<InteractionState>();
        app.init_resource::<PointerSample>();
        app.add_systems(Update, camera_controller);
        app.world_mut().spawn((
            SceneCamera,
            Transform::from_translation(HOME_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        ));
        app
    }

    fn tick(app: &mut App) {
        app.world_mut().resource_mut::<Time>().advance_by(TICK);
        app.update();
    }

    fn camera_position(app: &mut App) -> Vec3 {
        let mut query = app.world_mut().query_filtered::<&Transform, With<SceneCamera>>();
        query.single(app.world()).unwrap().translation
    }

    fn camera_rotation(app: &mut App) -> Quat {
        let mut query = app.world_mut().query_filtered::<&Transform, With<SceneCamera>>();
        query.single(app.world()).unwrap().rotation
    }

    #[test]
    fn homing_converges_monotonically_within_bounded_ticks() {
        let mut app = test_app();
        {
            let mut query = app.world_mut().query_filtered::<&mut Transform, With<SceneCamera>>();
            query.single_mut(app.world_mut()).unwrap().translation = Vec3::new(30.0, -14.0, 2.0);
        }
        app.world_mut().resource_mut::<InteractionState>().go_home();

        let mut distance = camera_position(&mut app).distance(HOME_POSITION);
        let mut ticks = 0;
        while app.world().resource::<InteractionState>().is_returning_home() {
            tick(&mut app);
            let next = camera_position(&mut app).distance(HOME_POSITION);
            assert!(next < distance, "distance to home must shrink every tick");
            distance = next;
            ticks += 1;
            assert!(ticks < 200, "homing failed to converge");
        }
        assert!(distance < CONVERGENCE_EPSILON);
    }

    #[test]
    fn homing_from_the_home_pose_ends_immediately() {
        let mut app = test_app();
        app.world_mut().resource_mut::<InteractionState>().go_home();
        tick(&mut app);
        assert!(!app.world().resource::<InteractionState>().is_returning_home());
        assert!(camera_position(&mut app).distance(HOME_POSITION) < 1e-6);
    }

    #[test]
    fn selecting_mid_homing_cancels_on_the_same_tick() {
        let mut app = test_app();
        {
            let mut query = app.world_mut().query_filtered::<&mut Transform, With<SceneCamera>>();
            query.single_mut(app.world_mut()).unwrap().translation = Vec3::new(20.0, 0.0, 0.0);
        }
        app.world_mut().resource_mut::<InteractionState>().go_home();
        for _ in 0..3 {
            tick(&mut app);
        }

        let target = Vec3::new(6.0, 1.0, 1.0);
        app.world_mut()
            .resource_mut::<InteractionState>()
            .select("planetBlue", target);
        assert!(!app.world().resource::<InteractionState>().is_returning_home());

        // Every subsequent tick moves toward the focus target, never home.
        let desired = target + FOCUS_VIEW_OFFSET;
        let mut focus_distance = camera_position(&mut app).distance(desired);
        for _ in 0..20 {
            tick(&mut app);
            let next = camera_position(&mut app).distance(desired);
            assert!(next < focus_distance);
            focus_distance = next;
        }
    }

    // Fresh session: goHome is a no-op, selection eases toward the body
    // plus the viewing offset, and leaving free-look clears the selection
    // and starts homing.
    #[test]
    fn focus_then_fixed_mode_scenario() {
        let mut app = test_app();

        app.world_mut().resource_mut::<InteractionState>().go_home();
        tick(&mut app);
        {
            let state = app.world().resource::<InteractionState>();
            assert!(!state.is_returning_home());
            assert_eq!(state.selected_id(), None);
        }
        assert!(camera_position(&mut app).distance(HOME_POSITION) < 1e-6);

        let target = Vec3::new(6.0, 1.0, 1.0);
        app.world_mut()
            .resource_mut::<InteractionState>()
            .select("planetBlue", target);
        assert_eq!(
            app.world().resource::<InteractionState>().selected_id(),
            Some("planetBlue")
        );

        let desired = target + FOCUS_VIEW_OFFSET;
        let mut distance = camera_position(&mut app).distance(desired);
        for _ in 0..30 {
            tick(&mut app);
            let next = camera_position(&mut app).distance(desired);
            assert!(next < distance, "focus approach must be monotone");
            distance = next;
        }

        app.world_mut()
            .resource_mut::<InteractionState>()
            .set_mode(InputMode::Fixed);
        let state = app.world().resource::<InteractionState>();
        assert_eq!(state.selected_id(), None);
        assert!(state.is_returning_home());
    }

    // Free-look orientation is a direct mapping of the pointer sample:
    // yaw = x * sensitivity, pitch = y * sensitivity.
    #[test]
    fn free_look_orientation_tracks_the_pointer_sample() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<PointerSample>()
            .set(Vec2::new(0.5, -0.5));
        tick(&mut app);

        let (yaw, pitch, roll) = camera_rotation(&mut app).to_euler(EulerRot::YXZ);
        assert!((yaw - 0.15).abs() < 1e-5);
        assert!((pitch + 0.15).abs() < 1e-5);
        assert!(roll.abs() < 1e-5);
    }

    #[test]
    fn fixed_mode_freezes_the_pose() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<InteractionState>()
            .set_mode(InputMode::Fixed);
        // Drain the homing transition triggered by leaving free-look.
        tick(&mut app);
        let before_pos = camera_position(&mut app);
        let before_rot = camera_rotation(&mut app);

        app.world_mut()
            .resource_mut::<PointerSample>()
            .set(Vec2::new(0.9, 0.9));
        for _ in 0..5 {
            tick(&mut app);
        }
        assert_eq!(camera_position(&mut app), before_pos);
        assert_eq!(camera_rotation(&mut app), before_rot);
    }

    #[test]
    fn zero_elapsed_time_advances_no_interpolation() {
        let mut app = test_app();
        {
            let mut query = app.world_mut().query_filtered::<&mut Transform, With<SceneCamera>>();
            query.single_mut(app.world_mut()).unwrap().translation = Vec3::new(20.0, 0.0, 0.0);
        }
        app.world_mut().resource_mut::<InteractionState>().go_home();
        // Update without advancing the clock: delta stays zero.
        app.update();
        assert_eq!(camera_position(&mut app), Vec3::new(20.0, 0.0, 0.0));
        assert!(app.world().resource::<InteractionState>().is_returning_home());
    }

    #[test]
    fn step_toward_is_a_contraction_and_handles_equal_points() {
        let target = HOME_POSITION;
        let stepped = step_toward(target, target);
        assert_eq!(stepped, target);
        assert!(has_converged(stepped, target));

        let start = Vec3::new(0.0, 0.0, 100.0);
        let stepped = step_toward(start, target);
        assert!(stepped.distance(target) < start.distance(target));
    }
}
