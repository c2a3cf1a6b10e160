use bevy::core_pipeline::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use constants::camera_settings::{CAMERA_FOV_DEGREES, HOME_POSITION};
use constants::scene_settings::{
    CONSTELLATION_STAR_SIZE, ORBIT_PATH_THICKNESS, STARFIELD_COUNT, STARFIELD_DEPTH,
    STARFIELD_INNER_RADIUS,
};

use crate::engine::camera::scene_camera::SceneCamera;
use crate::engine::scene::animation::{GlowPulse, OrbitMotion, Spinning};
use crate::engine::scene::catalog::{EntityDecl, EntityKind, SceneCatalog};
use crate::tools::picking::Selectable;

/// Build the whole scene from the catalog: lights, viewpoint camera, every
/// declared body, and the background starfield shell.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    catalog: Res<SceneCatalog>,
) {
    println!("=== STARFIELD SCENE ENGINE ===");
    println!("Spawning {} catalog entries", catalog.entries().len());

    spawn_lighting(&mut commands);
    spawn_scene_camera(&mut commands);
    for entry in catalog.entries() {
        spawn_entry(&mut commands, &mut meshes, &mut materials, entry);
    }
    spawn_starfield(&mut commands, &mut meshes, &mut materials);
}

fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        brightness: 120.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_scene_camera(commands: &mut Commands) {
    commands.spawn((
        SceneCamera,
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Bloom::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(HOME_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_entry(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    entry: &EntityDecl,
) {
    match &entry.kind {
        EntityKind::Planet {
            position,
            size,
            color,
        } => {
            let mut body = commands.spawn((
                Mesh3d(meshes.add(Sphere::new(*size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: *color,
                    ..default()
                })),
                Transform::from_translation(*position),
                Spinning,
            ));
            if let Some(id) = entry.id {
                body.insert(Selectable { id, radius: *size });
            }
        }
        EntityKind::GlowingPlanet {
            position,
            size,
            color,
            glow_color,
            emissive_intensity,
        } => {
            commands.spawn((
                Mesh3d(meshes.add(Sphere::new(*size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: *color,
                    emissive: glow_color.to_linear() * *emissive_intensity,
                    ..default()
                })),
                Transform::from_translation(*position),
            ));
        }
        EntityKind::RingedPlanet {
            position,
            size,
            color,
            ring_count,
            ring_colors,
            emissive_intensity,
            ring_orientation,
        } => {
            let mut group = commands.spawn((
                Transform::from_translation(*position),
                Visibility::default(),
                Spinning,
            ));
            if let Some(id) = entry.id {
                group.insert(Selectable { id, radius: *size });
            }
            group.with_children(|parent| {
                parent.spawn((
                    Mesh3d(meshes.add(Sphere::new(*size))),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: *color,
                        ..default()
                    })),
                ));
                let ring_rotation = Quat::from_euler(
                    EulerRot::XYZ,
                    ring_orientation.x,
                    ring_orientation.y,
                    ring_orientation.z,
                );
                for i in 0..*ring_count {
                    let inner = size * (1.2 + i as f32 * 0.1);
                    let outer = size * (1.3 + i as f32 * 0.1);
                    let ring_color = ring_colors[i % ring_colors.len()];
                    parent.spawn((
                        Mesh3d(meshes.add(Annulus::new(inner, outer))),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: ring_color,
                            emissive: ring_color.to_linear() * *emissive_intensity,
                            double_sided: true,
                            cull_mode: None,
                            ..default()
                        })),
                        Transform::from_rotation(ring_rotation),
                    ));
                }
            });
        }
        EntityKind::OrbitingPlanet { orbit, size, color } => {
            let orientation = Quat::from_euler(
                EulerRot::XYZ,
                orbit.orientation.x,
                orbit.orientation.y,
                orbit.orientation.z,
            );
            commands
                .spawn((
                    Transform::from_translation(orbit.center).with_rotation(orientation),
                    Visibility::default(),
                    OrbitMotion::new(orbit.angular_speed, orientation),
                ))
                .with_children(|parent| {
                    // Orbit path.
                    parent.spawn((
                        Mesh3d(meshes.add(Annulus::new(
                            orbit.radius - ORBIT_PATH_THICKNESS,
                            orbit.radius + ORBIT_PATH_THICKNESS,
                        ))),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: Color::WHITE,
                            unlit: true,
                            double_sided: true,
                            cull_mode: None,
                            ..default()
                        })),
                        Transform::from_rotation(Quat::from_rotation_x(
                            std::f32::consts::FRAC_PI_2,
                        )),
                    ));
                    // The orbiting body itself.
                    let mut body = parent.spawn((
                        Mesh3d(meshes.add(Sphere::new(*size))),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: *color,
                            ..default()
                        })),
                        Transform::from_translation(Vec3::X * orbit.radius),
                    ));
                    if let Some(id) = entry.id {
                        body.insert(Selectable { id, radius: *size });
                    }
                });
        }
        EntityKind::GlowPoint {
            position,
            color,
            size,
            pulse_speed,
        } => {
            commands.spawn((
                Mesh3d(meshes.add(Sphere::new(*size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: *color,
                    emissive: color.to_linear() * 1.5,
                    ..default()
                })),
                Transform::from_translation(*position),
                GlowPulse { speed: *pulse_speed },
            ));
        }
        EntityKind::Constellation { points, lines } => {
            commands
                .spawn((Transform::IDENTITY, Visibility::default()))
                .with_children(|parent| {
                    parent.spawn((
                        Mesh3d(meshes.add(line_mesh(lines))),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: Color::WHITE,
                            unlit: true,
                            ..default()
                        })),
                    ));
                    for point in points.iter() {
                        parent.spawn((
                            Mesh3d(meshes.add(Sphere::new(CONSTELLATION_STAR_SIZE * 0.5))),
                            MeshMaterial3d(materials.add(StandardMaterial {
                                base_color: Color::WHITE,
                                unlit: true,
                                ..default()
                            })),
                            Transform::from_translation(Vec3::from_array(*point)),
                        ));
                    }
                });
        }
    }
}

fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let positions = starfield_positions(STARFIELD_COUNT, STARFIELD_INNER_RADIUS, STARFIELD_DEPTH);
    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
    ));
}

fn line_mesh(lines: &[[f32; 6]]) -> Mesh {
    let positions: Vec<[f32; 3]> = lines
        .iter()
        .flat_map(|l| [[l[0], l[1], l[2]], [l[3], l[4], l[5]]])
        .collect();
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

/// Deterministic shell of background stars: a golden-angle spiral over the
/// sphere with the shell radius spread by a low-discrepancy sequence.
pub fn starfield_positions(count: usize, inner_radius: f32, depth: f32) -> Vec<[f32; 3]> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..count)
        .map(|i| {
            let t = (i as f32 + 0.5) / count as f32;
            let y = 1.0 - 2.0 * t;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            let shell = inner_radius + depth * (i as f32 * 0.618_034).fract();
            [ring * theta.cos() * shell, y * shell, ring * theta.sin() * shell]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starfield_fills_the_declared_shell() {
        let positions = starfield_positions(256, 60.0, 40.0);
        assert_eq!(positions.len(), 256);
        for p in positions {
            let r = Vec3::from_array(p).length();
            assert!(r.is_finite());
            assert!(r >= 60.0 - 1e-3, "star inside the shell: {r}");
            assert!(r <= 100.0 + 1e-3, "star outside the shell: {r}");
        }
    }

    #[test]
    fn constellation_line_mesh_pairs_segment_endpoints() {
        let lines = [[0.0, 4.0, -2.0, 1.0, 3.75, -2.0]];
        let mesh = line_mesh(&lines);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("line mesh has positions");
        assert_eq!(positions, &[[0.0, 4.0, -2.0], [1.0, 3.75, -2.0]]);
    }
}
