use bevy::prelude::*;
use bevy_enhanced_input::prelude::Action;

use super::ControllerConfig;
use super::ControllerMode;
use super::MouseController;
use crate::viewer_input::Zoom;
use crate::viewer_input::axis_value;

/// Field of view the controller wants, in degrees. Scrolling and the jump
/// animation edit this; `apply_zoom` copies it onto the projection.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
#[reflect(Component)]
pub struct ZoomLevel(pub f32);

impl Default for ZoomLevel {
    fn default() -> Self { Self(ControllerConfig::default().default_fov) }
}

/// Scroll up narrows the view. The result always lies inside the configured
/// range.
pub fn scrolled_fov(current: f32, scroll: f32, config: &ControllerConfig) -> f32 {
    let (min, max) = config.fov_range();
    let next = current - scroll * config.fov_sensitivity;
    if next.is_nan() {
        return current.clamp(min, max);
    }
    next.clamp(min, max)
}

/// Moves `current` toward `target` by at most `max_delta`, landing exactly on
/// `target` instead of overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let remaining = target - current;
    if remaining.abs() <= max_delta {
        target
    } else {
        current + remaining.signum() * max_delta
    }
}

pub(super) fn scroll_zoom(
    zoom: Query<&Action<Zoom>>,
    config: Res<ControllerConfig>,
    mut controllers: Query<(&ControllerMode, &mut ZoomLevel), With<MouseController>>,
) {
    let scroll = axis_value(&zoom).y;
    for (mode, mut level) in &mut controllers {
        if !mode.is_idle() {
            continue;
        }
        let next = scrolled_fov(level.0, scroll, &config);
        // avoid tripping change detection every frame
        if (next - level.0).abs() > f32::EPSILON {
            level.0 = next;
        }
    }
}

pub(super) fn apply_zoom(mut cameras: Query<(&ZoomLevel, &mut Projection), Changed<ZoomLevel>>) {
    for (level, mut projection) in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = level.0.to_radians();
        }
    }
}
