/// Self-rotation rate shared by every spinning body, radians per second.
pub const BODY_SPIN_RATE: f32 = 0.2;

/// Peak deviation of a glow point's pulsating scale.
pub const GLOW_PULSE_AMPLITUDE: f32 = 0.2;

/// Half-width of the orbit path ring geometry.
pub const ORBIT_PATH_THICKNESS: f32 = 0.01;

// Background starfield shell.
pub const STARFIELD_COUNT: usize = 1200;
pub const STARFIELD_INNER_RADIUS: f32 = 60.0;
pub const STARFIELD_DEPTH: f32 = 40.0;

/// Radius of the decorative constellation star markers.
pub const CONSTELLATION_STAR_SIZE: f32 = 0.1;
