use bevy::prelude::*;
use bevy_enhanced_input::prelude::Action;

use super::ControllerConfig;
use super::ControllerMode;
use super::MouseController;
use super::click::SELECT_BUTTON;
use crate::viewer_input::Look;
use crate::viewer_input::axis_value;

/// Accumulated drag rotation in degrees. The camera eases toward this every
/// idle frame rather than snapping to it.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct LookAngles {
    pub yaw:   f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Drags the panorama with the pointer: moving right swings the view left,
    /// moving down tilts it up.
    pub fn drag(&mut self, motion: Vec2, config: &ControllerConfig) {
        self.yaw += motion.x * config.look_sensitivity.x;
        self.pitch += motion.y * config.look_sensitivity.y;
        let max_pitch = config.max_pitch.abs();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }

    /// Angles that reproduce `rotation`, so a camera spawned facing somewhere
    /// doesn't swing back to the origin on the first drag.
    pub fn from_rotation(rotation: Quat) -> Self {
        let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
        Self {
            yaw:   yaw.to_degrees(),
            pitch: pitch.to_degrees(),
        }
    }
}

pub(super) fn drag_look(
    look: Query<&Action<Look>>,
    mouse: Res<ButtonInput<MouseButton>>,
    config: Res<ControllerConfig>,
    time: Res<Time>,
    mut controllers: Query<
        (&ControllerMode, &mut LookAngles, &mut Transform),
        With<MouseController>,
    >,
) {
    let held = mouse.pressed(SELECT_BUTTON);
    let motion = axis_value(&look);
    let blend = (time.delta_secs() * config.look_smoothing).clamp(0.0, 1.0);

    for (mode, mut angles, mut transform) in &mut controllers {
        if !mode.is_idle() {
            continue;
        }

        if held && motion != Vec2::ZERO {
            angles.drag(motion, &config);
        }

        let target = angles.rotation();
        if transform.rotation != target {
            transform.rotation = transform.rotation.slerp(target, blend);
        }
    }
}
