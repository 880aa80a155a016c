//! Placeholder viewer scene: a floor, a ring of panorama spheres with the
//! teleport zones linking them, the marker, and the camera.
mod constants;

use std::f32::consts::FRAC_PI_2;

use avian3d::prelude::*;
use bevy::color::palettes::tailwind;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::*;

use crate::controller::ControllerConfig;
use crate::controller::MouseController;
use crate::controller::NavigationSurface;
use crate::controller::PanoramaSphere;
use crate::controller::SphereEntered;
use crate::controller::TeleportMarker;
use crate::controller::TeleportZone;

pub struct ScenePlugin {
    /// Window title the current sphere name is appended to
    pub title: String,
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BaseTitle(self.title.clone()))
            .insert_resource(ClearColor(Color::from(tailwind::SLATE_900)))
            .add_systems(Startup, (spawn_lights, spawn_floor, spawn_spheres).chain())
            .add_observer(update_window_title);
    }
}

#[derive(Resource, Debug, Clone)]
struct BaseTitle(String);

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ControllerConfig>,
) {
    commands.spawn((
        Name::new("Floor"),
        NavigationSurface,
        RigidBody::Static,
        Collider::cuboid(FLOOR_SIZE, FLOOR_THICKNESS, FLOOR_SIZE),
        Mesh3d(meshes.add(Cuboid::new(FLOOR_SIZE, FLOOR_THICKNESS, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::from(tailwind::STONE_600),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -FLOOR_THICKNESS / 2.0, 0.0),
    ));

    commands.spawn((
        Name::new("Teleport Marker"),
        TeleportMarker,
        Mesh3d(meshes.add(Circle::new(MARKER_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::from(tailwind::SKY_300),
            unlit: true,
            ..default()
        })),
        marker_transform(&config),
    ));
}

/// The marker starts at the origin at its idle size, lying flat on the floor.
fn marker_transform(config: &ControllerConfig) -> Transform {
    Transform::from_xyz(0.0, MARKER_HEIGHT, 0.0)
        .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
        .with_scale(Vec3::splat(config.marker_idle_scale))
}

/// Floor point of the zone in sphere `from` that leads to sphere `to`.
fn zone_position(from: Vec3, to: Vec3) -> Vec3 {
    let from_floor = from.with_y(0.0);
    let toward = (to.with_y(0.0) - from_floor).normalize_or_zero();
    from_floor + toward * ZONE_OFFSET + Vec3::Y * (ZONE_HEIGHT / 2.0)
}

fn spawn_spheres(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ControllerConfig>,
) {
    let sphere_mesh = meshes.add(Sphere::new(SPHERE_RADIUS));
    let sphere_material = materials.add(StandardMaterial {
        base_color: Color::from(tailwind::AMBER_200).with_alpha(0.12),
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        unlit: true,
        ..default()
    });
    let zone_mesh = meshes.add(Cylinder::new(ZONE_RADIUS, ZONE_HEIGHT));
    let zone_material = materials.add(StandardMaterial {
        base_color: Color::from(tailwind::EMERALD_400),
        emissive: LinearRgba::from(tailwind::EMERALD_700),
        ..default()
    });

    let spheres: Vec<Entity> = SPHERES
        .iter()
        .enumerate()
        .map(|(index, (name, position))| {
            commands
                .spawn((
                    Name::new(*name),
                    PanoramaSphere,
                    Mesh3d(sphere_mesh.clone()),
                    MeshMaterial3d(sphere_material.clone()),
                    Transform::from_translation(*position),
                    if index == 0 {
                        Visibility::Visible
                    } else {
                        Visibility::Hidden
                    },
                ))
                .id()
        })
        .collect();

    for (index, (name, position)) in SPHERES.iter().enumerate() {
        let next = (index + 1) % SPHERES.len();
        let (next_name, next_position) = SPHERES[next];
        let mut zone = commands.spawn((
            Name::new(format!("Zone {name} -> {next_name}")),
            TeleportZone {
                target: Some(spheres[next]),
            },
            ChildOf(spheres[index]),
            RigidBody::Static,
            Collider::cylinder(ZONE_RADIUS, ZONE_HEIGHT),
            Mesh3d(zone_mesh.clone()),
            MeshMaterial3d(zone_material.clone()),
            Transform::from_translation(zone_position(*position, next_position) - *position),
        ));
        // only the start sphere's zones are live
        if index != 0 {
            zone.insert(ColliderDisabled);
        }
    }

    let (_, start) = SPHERES[0];
    let (_, first_target) = SPHERES[1];
    commands.spawn((
        Name::new("Viewer Camera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: config.default_fov.to_radians(),
            ..default()
        }),
        MouseController {
            current_sphere: spheres.first().copied(),
        },
        Transform::from_translation(start)
            .looking_at(zone_position(start, first_target), Vec3::Y),
    ));

    info!("spawned {} panorama spheres", spheres.len());
}

fn update_window_title(
    entered: On<SphereEntered>,
    base: Res<BaseTitle>,
    names: Query<&Name>,
    mut window: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = window.single_mut() else {
        return;
    };
    window.title = match names.get(entered.sphere) {
        Ok(name) => format!("{} - {name}", base.0),
        Err(_) => base.0.clone(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_sit_on_the_floor_toward_their_target() {
        let (_, from) = SPHERES[0];
        let (_, to) = SPHERES[1];
        let zone = zone_position(from, to);

        assert!((zone.y - ZONE_HEIGHT / 2.0).abs() < f32::EPSILON);
        let offset = zone.with_y(0.0) - from.with_y(0.0);
        assert!((offset.length() - ZONE_OFFSET).abs() < 1e-4);
        assert!(offset.dot(to - from) > 0.0);
    }

    #[test]
    fn marker_starts_at_the_configured_idle_size() {
        let config = ControllerConfig {
            marker_idle_scale: 0.25,
            ..default()
        };
        let marker = marker_transform(&config);
        assert_eq!(marker.scale, Vec3::splat(0.25));
        assert!((marker.translation.y - MARKER_HEIGHT).abs() < f32::EPSILON);
    }

    #[test]
    fn zones_fit_inside_the_floor() {
        for (index, (_, from)) in SPHERES.iter().enumerate() {
            let (_, to) = SPHERES[(index + 1) % SPHERES.len()];
            let zone = zone_position(*from, to);
            assert!(zone.x.abs() + ZONE_RADIUS < FLOOR_SIZE / 2.0);
            assert!(zone.z.abs() + ZONE_RADIUS < FLOOR_SIZE / 2.0);
        }
    }
}
