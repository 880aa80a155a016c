use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::ControllerConfig;
use super::ControllerMode;
use super::MouseController;
use super::NavigationSurface;
use super::TeleportMarker;
use super::TeleportZone;

/// Upper bound on intersections collected per cursor ray.
const MAX_CURSOR_HITS: u32 = 32;

/// What the cursor ray found this frame.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct CursorTarget {
    /// Nearest teleport zone under the cursor
    pub zone:          Option<Entity>,
    /// Where the ray meets the nearest navigation surface
    pub surface_point: Option<Vec3>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    TeleportZone,
    Navigation,
}

/// One ray intersection, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorHit {
    pub entity:   Entity,
    pub distance: f32,
    pub point:    Vec3,
}

impl CursorTarget {
    /// Picks the nearest zone and the nearest navigation surface out of an
    /// unordered set of hits. `kind_of` says what, if anything, an entity is.
    pub fn from_hits(
        hits: impl IntoIterator<Item = CursorHit>,
        kind_of: impl Fn(Entity) -> Option<SurfaceKind>,
    ) -> Self {
        let mut hits: Vec<CursorHit> = hits.into_iter().collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let mut target = Self::default();
        for hit in hits {
            match kind_of(hit.entity) {
                Some(SurfaceKind::TeleportZone) if target.zone.is_none() => {
                    target.zone = Some(hit.entity);
                },
                Some(SurfaceKind::Navigation) if target.surface_point.is_none() => {
                    target.surface_point = Some(hit.point);
                },
                _ => {},
            }
        }
        target
    }

    pub const fn over_teleport_zone(&self) -> bool { self.zone.is_some() }
}

/// Marker position for a navigation surface hit: follows the hit across the
/// floor but keeps its own height.
pub fn marker_translation(current: Vec3, surface_point: Vec3) -> Vec3 {
    Vec3::new(surface_point.x, current.y, surface_point.z)
}

pub(super) fn cast_cursor_ray(
    spatial_query: SpatialQuery,
    window: Query<&Window, With<PrimaryWindow>>,
    config: Res<ControllerConfig>,
    zones: Query<(), (With<TeleportZone>, Without<ColliderDisabled>)>,
    surfaces: Query<(), With<NavigationSurface>>,
    mut controllers: Query<
        (&ControllerMode, &Camera, &GlobalTransform, &mut CursorTarget),
        With<MouseController>,
    >,
) {
    let cursor = window.single().ok().and_then(Window::cursor_position);

    for (mode, camera, camera_transform, mut target) in &mut controllers {
        if !mode.is_idle() {
            continue;
        }

        let Some(ray) =
            cursor.and_then(|cursor| camera.viewport_to_world(camera_transform, cursor).ok())
        else {
            target.set_if_neq(CursorTarget::default());
            continue;
        };

        let hits = spatial_query
            .ray_hits(
                ray.origin,
                ray.direction,
                config.ray_max_distance,
                MAX_CURSOR_HITS,
                true,
                &SpatialQueryFilter::default(),
            )
            .into_iter()
            .map(|hit| CursorHit {
                entity:   hit.entity,
                distance: hit.distance,
                point:    ray.get_point(hit.distance),
            });

        let found = CursorTarget::from_hits(hits, |entity| {
            if zones.contains(entity) {
                Some(SurfaceKind::TeleportZone)
            } else if surfaces.contains(entity) {
                Some(SurfaceKind::Navigation)
            } else {
                None
            }
        });

        if found.zone != target.zone {
            debug!("cursor teleport zone: {:?}", found.zone);
        }
        target.set_if_neq(found);
    }
}

pub(super) fn aim_marker(
    config: Res<ControllerConfig>,
    controllers: Query<(&ControllerMode, &CursorTarget), With<MouseController>>,
    mut markers: Query<&mut Transform, (With<TeleportMarker>, Without<MouseController>)>,
) {
    for (mode, target) in &controllers {
        if !mode.is_idle() {
            continue;
        }
        let Some(surface_point) = target.surface_point else {
            continue;
        };

        let scale = Vec3::splat(config.marker_scale(target.over_teleport_zone()));
        for mut marker in &mut markers {
            marker.translation = marker_translation(marker.translation, surface_point);
            marker.scale = scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    fn hit(world: &mut World, distance: f32) -> CursorHit {
        CursorHit {
            entity: world.spawn_empty().id(),
            distance,
            point: Vec3::new(distance, 0.0, -distance),
        }
    }

    fn kinds(zones: &[Entity], surfaces: &[Entity]) -> impl Fn(Entity) -> Option<SurfaceKind> {
        let zones = zones.to_vec();
        let surfaces = surfaces.to_vec();
        move |entity| {
            if zones.contains(&entity) {
                Some(SurfaceKind::TeleportZone)
            } else if surfaces.contains(&entity) {
                Some(SurfaceKind::Navigation)
            } else {
                None
            }
        }
    }

    #[test]
    fn no_hits_means_no_target() {
        let target = CursorTarget::from_hits([], |_| None);
        assert_eq!(target, CursorTarget::default());
        assert!(!target.over_teleport_zone());
    }

    #[test]
    fn nearest_of_each_kind_wins() {
        let mut world = World::new();
        let far_zone = hit(&mut world, 9.0);
        let near_zone = hit(&mut world, 4.0);
        let far_floor = hit(&mut world, 12.0);
        let near_floor = hit(&mut world, 5.0);
        let wall = hit(&mut world, 1.0);

        let target = CursorTarget::from_hits(
            [far_zone, far_floor, wall, near_zone, near_floor],
            kinds(
                &[far_zone.entity, near_zone.entity],
                &[far_floor.entity, near_floor.entity],
            ),
        );

        assert_eq!(target.zone, Some(near_zone.entity));
        assert_eq!(target.surface_point, Some(near_floor.point));
    }

    #[test]
    fn floor_without_zone_is_not_a_teleport_target() {
        let mut world = World::new();
        let floor = hit(&mut world, 3.0);
        let target = CursorTarget::from_hits([floor], kinds(&[], &[floor.entity]));
        assert!(!target.over_teleport_zone());
        assert_eq!(target.surface_point, Some(floor.point));
    }

    #[test]
    fn marker_keeps_its_height() {
        let moved = marker_translation(Vec3::new(0.0, 0.05, 0.0), Vec3::new(3.0, -2.0, 7.0));
        assert_eq!(moved, Vec3::new(3.0, 0.05, 7.0));
    }

    const MARKER_AT: Vec3 = Vec3::new(0.0, 0.02, 0.0);

    /// Runs `aim_marker` once for an idle controller aiming at `target` and
    /// returns the marker afterwards.
    fn aim(target: CursorTarget) -> Transform {
        let mut world = World::new();
        world.init_resource::<ControllerConfig>();
        world.spawn((
            MouseController::default(),
            ControllerMode::Idle,
            target,
        ));
        let marker = world
            .spawn((
                TeleportMarker,
                Transform::from_translation(MARKER_AT).with_scale(Vec3::splat(0.5)),
            ))
            .id();

        world.run_system_once(aim_marker).expect("aim_marker should run");
        *world.get::<Transform>(marker).expect("marker exists")
    }

    #[test]
    fn marker_grows_over_a_zone_and_keeps_its_height() {
        let mut world = World::new();
        let zone = world.spawn_empty().id();
        let marker = aim(CursorTarget {
            zone:          Some(zone),
            surface_point: Some(Vec3::new(4.0, -1.0, 2.0)),
        });

        assert_eq!(marker.translation, Vec3::new(4.0, MARKER_AT.y, 2.0));
        assert_eq!(marker.scale, Vec3::splat(1.0));
    }

    #[test]
    fn marker_shrinks_on_plain_floor() {
        let marker = aim(CursorTarget {
            zone:          None,
            surface_point: Some(Vec3::new(-3.0, 0.0, 6.0)),
        });

        assert_eq!(marker.translation, Vec3::new(-3.0, MARKER_AT.y, 6.0));
        assert_eq!(marker.scale, Vec3::splat(0.1));
    }

    #[test]
    fn marker_stays_put_without_a_surface_hit() {
        let mut world = World::new();
        let zone = world.spawn_empty().id();
        let marker = aim(CursorTarget {
            zone:          Some(zone),
            surface_point: None,
        });

        assert_eq!(marker.translation, MARKER_AT);
        assert_eq!(marker.scale, Vec3::splat(0.5));
    }
}
