use bevy::prelude::*;
use serde::Serialize;

/// Stable identifier of a selectable scene body.
pub type EntityId = &'static str;

/// Display record shown by the info overlay and returned over RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    pub title: &'static str,
    pub description: &'static str,
}

/// Record returned for identifiers the catalog does not know.
pub const DEFAULT_ENTITY_INFO: EntityInfo = EntityInfo {
    title: "Planet Info",
    description: "Mysterious planet with no known data.",
};

/// Orbit parameters for a body circling a fixed centre.
#[derive(Debug, Clone, Copy)]
pub struct OrbitDescriptor {
    pub radius: f32,
    /// Radians per second of orbital phase.
    pub angular_speed: f32,
    /// Euler tilt of the orbit plane.
    pub orientation: Vec3,
    pub center: Vec3,
}

/// Shape of one catalog entry, tagged by what the body is.
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Self-rotating sphere at a fixed position.
    Planet { position: Vec3, size: f32, color: Color },
    /// Stationary emissive sphere, not selectable.
    GlowingPlanet {
        position: Vec3,
        size: f32,
        color: Color,
        glow_color: Color,
        emissive_intensity: f32,
    },
    /// Self-rotating sphere wrapped in concentric emissive rings.
    RingedPlanet {
        position: Vec3,
        size: f32,
        color: Color,
        ring_count: usize,
        ring_colors: [Color; 2],
        emissive_intensity: f32,
        ring_orientation: Vec3,
    },
    /// Sphere carried around an orbit, with a visible orbit path.
    OrbitingPlanet {
        orbit: OrbitDescriptor,
        size: f32,
        color: Color,
    },
    /// Small pulsating emissive sphere.
    GlowPoint {
        position: Vec3,
        color: Color,
        size: f32,
        pulse_speed: f32,
    },
    /// Decorative line-art figure: star markers joined by segments.
    Constellation {
        points: &'static [[f32; 3]],
        lines: &'static [[f32; 6]],
    },
}

/// One scene object as declared at startup. Selectable entries carry an id
/// and a display record; decorative ones carry neither.
#[derive(Debug, Clone)]
pub struct EntityDecl {
    pub id: Option<EntityId>,
    pub kind: EntityKind,
    pub info: Option<EntityInfo>,
}

/// Static, read-only registry of everything placed in the scene.
/// Built once at startup; never mutated afterwards.
#[derive(Resource)]
pub struct SceneCatalog {
    entries: Vec<EntityDecl>,
}

impl SceneCatalog {
    /// Build the catalog from the static scene declarations.
    /// Selectable ids must be unique across the registry.
    pub fn from_declarations() -> Self {
        let catalog = Self {
            entries: scene_declarations(),
        };
        let mut seen: Vec<EntityId> = Vec::new();
        for id in catalog.entries.iter().filter_map(|e| e.id) {
            assert!(!seen.contains(&id), "duplicate entity id: {id}");
            seen.push(id);
        }
        catalog
    }

    pub fn entries(&self) -> &[EntityDecl] {
        &self.entries
    }

    /// Total lookup of a display record. Unknown identifiers resolve to the
    /// fixed default record instead of failing.
    pub fn describe(&self, id: &str) -> EntityInfo {
        self.entries
            .iter()
            .find(|entry| entry.id.is_some_and(|candidate| candidate == id))
            .and_then(|entry| entry.info)
            .unwrap_or(DEFAULT_ENTITY_INFO)
    }

    /// Map an externally supplied identifier onto the registry's static id.
    pub fn resolve_id(&self, id: &str) -> Option<EntityId> {
        self.entries
            .iter()
            .filter_map(|entry| entry.id)
            .find(|candidate| *candidate == id)
    }
}

// Big Dipper figure.
const BIG_DIPPER_POINTS: [[f32; 3]; 7] = [
    [0.0, 4.0, -2.0],
    [1.0, 3.75, -2.0],
    [2.0, 3.0, -2.0],
    [2.75, 2.5, -2.0],
    [5.0, 2.0, -2.0],
    [4.25, 1.0, -2.0],
    [2.75, 1.35, -2.0],
];

const BIG_DIPPER_LINES: [[f32; 6]; 7] = [
    [0.0, 4.0, -2.0, 1.0, 3.75, -2.0],
    [1.0, 3.75, -2.0, 2.0, 3.0, -2.0],
    [2.0, 3.0, -2.0, 2.75, 2.5, -2.0],
    [2.75, 2.5, -2.0, 5.0, 2.0, -2.0],
    [5.0, 2.0, -2.0, 4.25, 1.0, -2.0],
    [4.25, 1.0, -2.0, 2.75, 1.35, -2.0],
    [2.75, 1.35, -2.0, 2.75, 2.5, -2.0],
];

// Orion figure.
const ORION_POINTS: [[f32; 3]; 6] = [
    [-2.0, -2.0, 0.0],
    [-3.0, -3.0, 0.0],
    [-2.5, -4.0, 0.0],
    [-2.0, -4.5, 0.0],
    [-1.5, -4.0, 0.0],
    [-1.0, -3.0, 0.0],
];

const ORION_LINES: [[f32; 6]; 6] = [
    [-2.0, -2.0, 0.0, -3.0, -3.0, 0.0],
    [-3.0, -3.0, 0.0, -2.5, -4.0, 0.0],
    [-2.5, -4.0, 0.0, -2.0, -4.5, 0.0],
    [-2.0, -4.5, 0.0, -1.5, -4.0, 0.0],
    [-1.5, -4.0, 0.0, -1.0, -3.0, 0.0],
    [-1.0, -3.0, 0.0, -2.0, -2.0, 0.0],
];

fn scene_declarations() -> Vec<EntityDecl> {
    let pink = Color::srgb(0.95, 0.55, 0.78);
    let blue = Color::srgb(0.25, 0.45, 0.95);
    let magenta = Color::srgb(0.85, 0.20, 0.75);
    let rock = Color::srgb(0.55, 0.48, 0.42);
    let ring_teal = Color::srgb(0.0, 1.0, 0.8);
    let ring_magenta = Color::srgb(1.0, 0.0, 1.0);
    let spark_pink = Color::srgb(0.95, 0.31, 0.78);
    let spark_cyan = Color::srgb(0.38, 0.85, 0.98);

    let glow_point = |position: Vec3, color: Color, size: f32, pulse_speed: f32| EntityDecl {
        id: None,
        kind: EntityKind::GlowPoint {
            position,
            color,
            size,
            pulse_speed,
        },
        info: None,
    };

    vec![
        EntityDecl {
            id: Some("pinkPlanet"),
            kind: EntityKind::Planet {
                position: Vec3::new(-3.0, 3.0, -1.5),
                size: 0.35,
                color: pink,
            },
            info: Some(EntityInfo {
                title: "The Pink Planet",
                description: "A swirling pink atmosphere with cotton candy clouds!",
            }),
        },
        EntityDecl {
            id: None,
            kind: EntityKind::GlowingPlanet {
                position: Vec3::new(0.0, 0.0, -0.5),
                size: 1.28,
                color: Color::WHITE,
                glow_color: Color::WHITE,
                emissive_intensity: 1.0,
            },
            info: None,
        },
        EntityDecl {
            id: Some("centerRings"),
            kind: EntityKind::RingedPlanet {
                position: Vec3::ZERO,
                size: 1.2,
                color: rock,
                ring_count: 10,
                ring_colors: [ring_teal, ring_magenta],
                emissive_intensity: 2.0,
                ring_orientation: Vec3::new(1.4, 0.3, 0.0),
            },
            info: Some(EntityInfo {
                title: "Center Ring Planet",
                description: "A majestic ringed planet right at the center of the scene.",
            }),
        },
        EntityDecl {
            id: Some("ringPlanet2"),
            kind: EntityKind::RingedPlanet {
                position: Vec3::new(4.0, 2.0, -4.0),
                size: 0.4,
                color: pink,
                ring_count: 1,
                ring_colors: [ring_teal, ring_magenta],
                emissive_intensity: 0.0,
                ring_orientation: Vec3::new(1.2, 0.0, 0.0),
            },
            info: Some(EntityInfo {
                title: "Smaller Ring Planet",
                description: "A tidally locked planet sporting subtle rings.",
            }),
        },
        EntityDecl {
            id: Some("planetBlue"),
            kind: EntityKind::Planet {
                position: Vec3::new(6.0, 1.0, 1.0),
                size: 0.7,
                color: blue,
            },
            info: Some(EntityInfo {
                title: "Blue Planet",
                description: "A bright, ocean-covered world with swirling storms.",
            }),
        },
        EntityDecl {
            id: Some("planetMagenta"),
            kind: EntityKind::Planet {
                position: Vec3::new(-4.0, -2.0, 1.0),
                size: 0.7,
                color: magenta,
            },
            info: Some(EntityInfo {
                title: "Magenta Planet",
                description: "Vivid magenta surface, rumored to hold exotic crystals.",
            }),
        },
        EntityDecl {
            id: Some("orbitPlanet1"),
            kind: EntityKind::OrbitingPlanet {
                orbit: OrbitDescriptor {
                    radius: 3.0,
                    angular_speed: 0.7,
                    orientation: Vec3::new(0.5, 0.0, 0.0),
                    center: Vec3::ZERO,
                },
                size: 0.3,
                color: pink,
            },
            info: Some(EntityInfo {
                title: "Orbiting Planet #1",
                description: "Orbits at radius 3. Possibly home to advanced life!",
            }),
        },
        EntityDecl {
            id: Some("orbitPlanet2"),
            kind: EntityKind::OrbitingPlanet {
                orbit: OrbitDescriptor {
                    radius: 5.0,
                    angular_speed: 0.5,
                    orientation: Vec3::new(0.5, 0.0, 0.0),
                    center: Vec3::ZERO,
                },
                size: 0.5,
                color: blue,
            },
            info: Some(EntityInfo {
                title: "Orbiting Planet #2",
                description: "Orbits at radius 5. Great for stargazing!",
            }),
        },
        EntityDecl {
            id: Some("orbitPlanet3"),
            kind: EntityKind::OrbitingPlanet {
                orbit: OrbitDescriptor {
                    radius: 7.0,
                    angular_speed: 0.3,
                    orientation: Vec3::new(0.5, 0.0, 0.0),
                    center: Vec3::ZERO,
                },
                size: 0.5,
                color: magenta,
            },
            info: Some(EntityInfo {
                title: "Orbiting Planet #3",
                description: "Orbits at radius 7. Has rings under development!",
            }),
        },
        EntityDecl {
            id: None,
            kind: EntityKind::Constellation {
                points: &BIG_DIPPER_POINTS,
                lines: &BIG_DIPPER_LINES,
            },
            info: None,
        },
        EntityDecl {
            id: None,
            kind: EntityKind::Constellation {
                points: &ORION_POINTS,
                lines: &ORION_LINES,
            },
            info: None,
        },
        glow_point(Vec3::new(2.0, 3.0, 0.0), spark_pink, 0.05, 3.0),
        glow_point(Vec3::new(-4.0, 1.0, -2.0), spark_cyan, 0.08, 1.5),
        glow_point(Vec3::new(-4.0, 2.0, 0.0), spark_pink, 0.02, 2.0),
        glow_point(Vec3::new(4.0, -3.0, 1.0), spark_pink, 0.03, 2.0),
        glow_point(Vec3::new(-5.0, -1.0, 3.0), spark_pink, 0.03, 2.0),
        glow_point(Vec3::new(-2.0, -3.0, 0.0), spark_pink, 0.07, 3.0),
        glow_point(Vec3::new(4.0, 1.0, 2.0), spark_cyan, 0.05, 1.5),
        glow_point(Vec3::new(5.0, 3.0, 1.0), spark_cyan, 0.07, 2.0),
        glow_point(Vec3::new(1.0, -1.0, 2.0), spark_cyan, 0.05, 1.5),
        glow_point(Vec3::new(2.0, -1.0, 3.0), spark_pink, 0.01, 3.0),
        glow_point(Vec3::new(5.0, -2.0, 3.0), spark_cyan, 0.05, 2.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_returns_own_record_for_registered_ids() {
        let catalog = SceneCatalog::from_declarations();
        assert_eq!(catalog.describe("planetBlue").title, "Blue Planet");
        assert_eq!(
            catalog.describe("orbitPlanet2").description,
            "Orbits at radius 5. Great for stargazing!"
        );
    }

    #[test]
    fn describe_is_total_for_unknown_ids() {
        let catalog = SceneCatalog::from_declarations();
        assert_eq!(catalog.describe("notAPlanet"), DEFAULT_ENTITY_INFO);
        assert_eq!(catalog.describe(""), DEFAULT_ENTITY_INFO);
    }

    #[test]
    fn selectable_ids_are_unique() {
        let catalog = SceneCatalog::from_declarations();
        let ids: Vec<_> = catalog.entries().iter().filter_map(|e| e.id).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id), "duplicate id {id}");
        }
    }

    #[test]
    fn selectable_entries_carry_display_records() {
        let catalog = SceneCatalog::from_declarations();
        for entry in catalog.entries() {
            if entry.id.is_some() {
                assert!(entry.info.is_some());
            }
        }
    }

    #[test]
    fn resolve_id_maps_external_strings_onto_static_ids() {
        let catalog = SceneCatalog::from_declarations();
        assert_eq!(catalog.resolve_id("pinkPlanet"), Some("pinkPlanet"));
        assert_eq!(catalog.resolve_id("unknown"), None);
    }
}
