mod aim;
mod click;
mod config;
mod look;
mod teleport;
mod zoom;

pub use aim::CursorTarget;
use bevy::prelude::*;
pub use click::ClickTracker;
use config::ControllerConfigPlugin;
pub use config::ControllerConfig;
pub use look::LookAngles;
pub use teleport::SphereEntered;
pub use zoom::ZoomLevel;

use crate::schedule::ViewerSet;

pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ControllerConfigPlugin)
            .register_type::<MouseController>()
            .register_type::<ControllerMode>()
            .register_type::<TeleportZone>()
            .add_observer(initialize_controller)
            .add_observer(teleport::on_sphere_entered)
            .add_systems(
                Update,
                (
                    teleport::animate_teleport,
                    aim::cast_cursor_ray,
                    zoom::scroll_zoom,
                    aim::aim_marker,
                    click::track_clicks,
                    look::drag_look,
                    teleport::arm_teleport,
                    teleport::finish_landing,
                )
                    .chain()
                    .in_set(ViewerSet::UserInput),
            )
            .add_systems(Update, zoom::apply_zoom.in_set(ViewerSet::EntityUpdates));
    }
}

/// First-person mouse controller. Lives on the camera entity.
#[derive(Component, Reflect, Debug, Default, Clone, PartialEq, Eq)]
#[reflect(Component)]
#[require(
    ControllerMode,
    ClickTracker,
    CursorTarget,
    LookAngles,
    ZoomLevel,
    Transform,
    Visibility
)]
pub struct MouseController {
    /// The sphere the camera currently sits in
    pub current_sphere: Option<Entity>,
}

#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub enum ControllerMode {
    /// Looking around, zooming and aiming
    #[default]
    Idle,
    /// Zooming in before jumping to the target sphere of `zone`
    Teleporting { zone: Entity },
    /// Jumped this frame; idle again from the next one
    Landing,
}

impl ControllerMode {
    pub const fn is_idle(&self) -> bool { matches!(self, Self::Idle) }
}

/// One panoramic viewpoint. Only the sphere the camera is in is shown.
#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct PanoramaSphere;

/// Clicking this collider jumps to `target`.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct TeleportZone {
    pub target: Option<Entity>,
}

/// Floor the teleport marker slides across.
#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component)]
pub struct NavigationSurface;

#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct TeleportMarker;

/// Starts every controller at the configured field of view, looking wherever
/// its transform already points.
fn initialize_controller(
    add: On<Add, MouseController>,
    config: Res<ControllerConfig>,
    mut controllers: Query<(&Transform, &mut ZoomLevel, &mut LookAngles)>,
) {
    if let Ok((transform, mut zoom, mut angles)) = controllers.get_mut(add.entity) {
        zoom.0 = config.default_fov;
        *angles = LookAngles::from_rotation(transform.rotation);
    }
}
