use avian3d::prelude::ColliderDisabled;
use bevy::prelude::*;

use super::ClickTracker;
use super::ControllerConfig;
use super::ControllerMode;
use super::CursorTarget;
use super::MouseController;
use super::PanoramaSphere;
use super::TeleportZone;
use super::ZoomLevel;
use super::zoom::move_towards;

/// Fired on the controller after it lands inside a new sphere.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct SphereEntered {
    pub entity:   Entity,
    pub sphere:   Entity,
    pub previous: Option<Entity>,
}

/// A short click over a teleport zone starts the jump. Nothing else can arm
/// while one is in flight since this only looks at idle controllers.
pub(super) fn arm_teleport(
    mut controllers: Query<
        (Entity, &mut ControllerMode, &ClickTracker, &CursorTarget),
        With<MouseController>,
    >,
) {
    for (entity, mut mode, tracker, target) in &mut controllers {
        if !mode.is_idle() || !tracker.short_clicked() {
            continue;
        }
        let Some(zone) = target.zone else {
            continue;
        };

        info!("controller {entity} arming teleport through zone {zone}");
        *mode = ControllerMode::Teleporting { zone };
    }
}

/// Zooms toward `teleport_fov`, then jumps. A controller that reaches the
/// target zoom this frame is left `Landing`, so none of the idle systems act
/// on it until the next frame.
pub(super) fn animate_teleport(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    time: Res<Time>,
    zones: Query<&TeleportZone>,
    children: Query<&Children>,
    mut spheres: Query<(&GlobalTransform, &mut Visibility), With<PanoramaSphere>>,
    mut controllers: Query<(
        Entity,
        &mut MouseController,
        &mut ControllerMode,
        &mut ZoomLevel,
        &mut Transform,
    )>,
) {
    for (entity, mut controller, mut mode, mut zoom, mut transform) in &mut controllers {
        let ControllerMode::Teleporting { zone } = *mode else {
            continue;
        };

        zoom.0 = move_towards(
            zoom.0,
            config.teleport_fov,
            config.teleport_zoom_speed * time.delta_secs(),
        );
        if (zoom.0 - config.teleport_fov).abs() > f32::EPSILON {
            continue;
        }

        zoom.0 = config.default_fov;
        *mode = ControllerMode::Landing;

        let target = zones.get(zone).ok().and_then(|zone| zone.target);
        let Some(sphere) = target.filter(|sphere| spheres.contains(*sphere)) else {
            warn!(
                "teleport zone {zone} has no target sphere, staying at {:?}",
                controller.current_sphere
            );
            continue;
        };

        let Ok((sphere_transform, mut visibility)) = spheres.get_mut(sphere) else {
            continue;
        };
        transform.translation = sphere_transform.translation();
        *visibility = Visibility::Visible;
        set_zones_enabled(&mut commands, &children, &zones, sphere, true);

        let previous = controller.current_sphere.replace(sphere);
        if let Some(previous) = previous.filter(|previous| *previous != sphere)
            && let Ok((_, mut visibility)) = spheres.get_mut(previous)
        {
            *visibility = Visibility::Hidden;
            set_zones_enabled(&mut commands, &children, &zones, previous, false);
        }

        debug!(
            "controller {entity} jumped to ({:.2}, {:.2}, {:.2})",
            transform.translation.x, transform.translation.y, transform.translation.z
        );
        commands.trigger(SphereEntered {
            entity,
            sphere,
            previous,
        });
    }
}

/// Zones are children of the sphere they sit in and only take ray hits while
/// that sphere is the current one.
fn set_zones_enabled(
    commands: &mut Commands,
    children: &Query<&Children>,
    zones: &Query<&TeleportZone>,
    sphere: Entity,
    enabled: bool,
) {
    for child in children.iter_descendants(sphere) {
        if !zones.contains(child) {
            continue;
        }
        if enabled {
            commands.entity(child).remove::<ColliderDisabled>();
        } else {
            commands.entity(child).insert(ColliderDisabled);
        }
    }
}

/// Last in the input chain: a controller that landed this frame is idle from
/// the next one.
pub(super) fn finish_landing(mut controllers: Query<&mut ControllerMode, With<MouseController>>) {
    for mut mode in &mut controllers {
        if *mode == ControllerMode::Landing {
            *mode = ControllerMode::Idle;
        }
    }
}

pub(super) fn on_sphere_entered(entered: On<SphereEntered>, names: Query<&Name>) {
    let label = |entity: Entity| {
        names
            .get(entity)
            .map_or_else(|_| entity.to_string(), |name| name.as_str().to_owned())
    };
    info!(
        "entered sphere {} from {}",
        label(entered.sphere),
        entered.previous.map_or_else(|| "nowhere".to_owned(), &label)
    );
}
