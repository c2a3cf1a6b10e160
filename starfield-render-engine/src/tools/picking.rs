use bevy::{prelude::*, window::PrimaryWindow};

use crate::engine::scene::catalog::EntityId;
use crate::tools::interaction::{InteractionSource, SelectEntityEvent};

/// Hit-test volume of a selectable body.
#[derive(Component, Debug, Clone, Copy)]
pub struct Selectable {
    pub id: EntityId,
    pub radius: f32,
}

/// Nearest non-negative intersection of a ray with a sphere.
/// `dir` must be normalized.
pub fn ray_hits_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t_near = -b - sqrt_d;
    let t_far = -b + sqrt_d;
    if t_near >= 0.0 {
        Some(t_near)
    } else if t_far >= 0.0 {
        Some(t_far)
    } else {
        None
    }
}

/// Uniform click dispatch: casts a cursor ray against every selectable body
/// and emits a single selection event for the nearest hit. The body's world
/// position is sampled here, at selection time.
pub fn select_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    selectables: Query<(&Selectable, &GlobalTransform)>,
    ui_buttons: Query<&Interaction, With<Button>>,
    mut select_events: EventWriter<SelectEntityEvent>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    // The UI owns this click.
    if ui_buttons.iter().any(|i| *i != Interaction::None) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) else {
        return;
    };
    let origin = ray.origin;
    let dir = ray.direction.as_vec3();

    let mut best: Option<(EntityId, Vec3, f32)> = None;
    for (selectable, xf) in &selectables {
        let center = xf.translation();
        if let Some(t) = ray_hits_sphere(origin, dir, center, selectable.radius) {
            if t > 0.0 && best.is_none_or(|(_, _, best_t)| t < best_t) {
                best = Some((selectable.id, center, t));
            }
        }
    }

    if let Some((id, center, _t)) = best {
        select_events.write(SelectEntityEvent {
            id,
            world_position: Some(center),
            source: InteractionSource::Pointer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_ahead_of_the_origin() {
        let t = ray_hits_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0);
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn ray_misses_an_offset_sphere() {
        let t = ray_hits_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(3.0, 0.0, 5.0), 1.0);
        assert_eq!(t, None);
    }

    #[test]
    fn ray_starting_inside_hits_the_far_surface() {
        let t = ray_hits_sphere(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 1.0);
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn sphere_behind_the_origin_is_ignored() {
        let t = ray_hits_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert_eq!(t, None);
    }

    #[test]
    fn grazing_ray_reports_the_tangent_point() {
        let t = ray_hits_sphere(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0)
            .expect("tangent ray should hit");
        assert!((t - 5.0).abs() < 1e-3);
    }
}
