use bevy::prelude::*;
use constants::scene_settings::{BODY_SPIN_RATE, GLOW_PULSE_AMPLITUDE};

/// Marker for bodies that rotate in place at the shared fixed rate.
#[derive(Component)]
pub struct Spinning;

/// Orbital phase of a pivot entity. The pivot's rotation is recomputed from
/// the accumulated phase each tick; the orbiting body is a child offset by
/// the orbit radius.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitMotion {
    pub angular_speed: f32,
    pub phase: f32,
    pub orientation: Quat,
}

impl OrbitMotion {
    pub fn new(angular_speed: f32, orientation: Quat) -> Self {
        Self {
            angular_speed,
            phase: 0.0,
            orientation,
        }
    }

    /// Advance the orbital phase. Non-positive elapsed time advances nothing.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.phase += self.angular_speed * dt;
        }
    }

    pub fn rotation(&self) -> Quat {
        self.orientation * Quat::from_rotation_y(self.phase)
    }
}

/// Pulse rate of a glow point's breathing scale animation.
#[derive(Component, Debug, Clone, Copy)]
pub struct GlowPulse {
    pub speed: f32,
}

/// Scale factor of a glow point after `elapsed` seconds.
pub fn pulse_scale(elapsed: f32, pulse_speed: f32) -> f32 {
    1.0 + GLOW_PULSE_AMPLITUDE * (elapsed * pulse_speed).sin()
}

pub fn spin_bodies(time: Res<Time>, mut bodies: Query<&mut Transform, With<Spinning>>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for mut transform in &mut bodies {
        transform.rotate_y(BODY_SPIN_RATE * dt);
    }
}

pub fn advance_orbits(time: Res<Time>, mut pivots: Query<(&mut OrbitMotion, &mut Transform)>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (mut orbit, mut transform) in &mut pivots {
        orbit.advance(dt);
        transform.rotation = orbit.rotation();
    }
}

pub fn pulse_glow_points(time: Res<Time>, mut points: Query<(&GlowPulse, &mut Transform)>) {
    if time.delta_secs() <= 0.0 {
        return;
    }
    let elapsed = time.elapsed_secs();
    for (pulse, mut transform) in &mut points {
        transform.scale = Vec3::splat(pulse_scale(elapsed, pulse.speed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::interaction::InteractionState;
    use std::time::Duration;

    #[test]
    fn orbit_phase_advances_by_speed_times_elapsed() {
        let mut orbit = OrbitMotion::new(0.5, Quat::IDENTITY);
        orbit.advance(2.0);
        assert_eq!(orbit.phase, 1.0);
    }

    #[test]
    fn orbit_phase_accumulates_across_ticks() {
        let mut orbit = OrbitMotion::new(0.5, Quat::IDENTITY);
        for _ in 0..20 {
            orbit.advance(0.1);
        }
        assert!((orbit.phase - 1.0).abs() < 1e-5);
    }

    #[test]
    fn non_positive_elapsed_time_advances_nothing() {
        let mut orbit = OrbitMotion::new(0.5, Quat::IDENTITY);
        orbit.advance(0.0);
        orbit.advance(-0.25);
        assert_eq!(orbit.phase, 0.0);
    }

    #[test]
    fn pulse_scale_breathes_around_unit_scale() {
        assert_eq!(pulse_scale(0.0, 2.0), 1.0);
        let peak = pulse_scale(std::f32::consts::FRAC_PI_2, 1.0);
        assert!((peak - (1.0 + GLOW_PULSE_AMPLITUDE)).abs() < 1e-6);
        for i in 0..100 {
            let scale = pulse_scale(i as f32 * 0.13, 2.0);
            assert!(scale >= 1.0 - GLOW_PULSE_AMPLITUDE - 1e-6);
            assert!(scale <= 1.0 + GLOW_PULSE_AMPLITUDE + 1e-6);
        }
    }

    // Orbits advance from elapsed time alone, regardless of any selection
    // activity happening on the same ticks.
    #[test]
    fn orbit_advance_is_independent_of_selection_state() {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.init_resource::<InteractionState>();
        app.add_systems(Update, advance_orbits);
        let pivot = app
            .world_mut()
            .spawn((OrbitMotion::new(0.5, Quat::IDENTITY), Transform::default()))
            .id();

        for i in 0..20 {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(Duration::from_millis(100));
            if i == 10 {
                app.world_mut()
                    .resource_mut::<InteractionState>()
                    .select("planetBlue", Vec3::new(6.0, 1.0, 1.0));
            }
            app.update();
        }

        let orbit = app.world().get::<OrbitMotion>(pivot).unwrap();
        assert!((orbit.phase - 1.0).abs() < 1e-4);
    }
}
