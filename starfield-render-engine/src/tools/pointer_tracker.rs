use bevy::{prelude::*, window::PrimaryWindow};

/// Latest normalized pointer coordinate, both components in [-1, 1].
/// Overwritten on every pointer-move notification; never queued.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerSample {
    ndc: Vec2,
}

impl PointerSample {
    pub fn get(&self) -> Vec2 {
        self.ndc
    }

    #[cfg(test)]
    pub fn set(&mut self, ndc: Vec2) {
        self.ndc = ndc;
    }
}

/// Map a window cursor position onto the [-1, 1] square, y up.
/// Non-finite input and degenerate window sizes produce no sample.
pub fn normalize_cursor(position: Vec2, window_size: Vec2) -> Option<Vec2> {
    if !position.is_finite() || !window_size.is_finite() {
        return None;
    }
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    let x = (position.x / window_size.x) * 2.0 - 1.0;
    let y = -((position.y / window_size.y) * 2.0 - 1.0);
    Some(Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
}

/// Coalesce this frame's cursor events into the single latest sample.
/// Invalid samples are dropped; the previous sample is retained.
pub fn track_pointer(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sample: ResMut<PointerSample>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    for event in cursor_moved.read() {
        if let Some(ndc) = normalize_cursor(event.position, size) {
            sample.ndc = ndc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn centre_of_the_window_maps_to_origin() {
        let ndc = normalize_cursor(WINDOW * 0.5, WINDOW).unwrap();
        assert!(ndc.length() < 1e-6);
    }

    #[test]
    fn corners_map_to_unit_extremes() {
        assert_eq!(
            normalize_cursor(Vec2::ZERO, WINDOW).unwrap(),
            Vec2::new(-1.0, 1.0)
        );
        assert_eq!(normalize_cursor(WINDOW, WINDOW).unwrap(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn samples_outside_the_window_are_clamped() {
        let ndc = normalize_cursor(Vec2::new(5000.0, -300.0), WINDOW).unwrap();
        assert_eq!(ndc, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        assert!(normalize_cursor(Vec2::new(f32::NAN, 10.0), WINDOW).is_none());
        assert!(normalize_cursor(Vec2::new(10.0, f32::INFINITY), WINDOW).is_none());
    }

    #[test]
    fn degenerate_window_sizes_produce_no_sample() {
        assert!(normalize_cursor(Vec2::new(10.0, 10.0), Vec2::ZERO).is_none());
        assert!(normalize_cursor(Vec2::new(10.0, 10.0), Vec2::new(1280.0, -720.0)).is_none());
    }
}
