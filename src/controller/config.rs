use bevy::prelude::*;
use bevy_enhanced_input::prelude::Start;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::viewer_input::ToggleControllerInspector;

pub struct ControllerConfigPlugin;

impl Plugin for ControllerConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<ControllerConfig>::default()
                .run_if(resource_equals(ControllerInspector(true))),
        )
        .init_resource::<ControllerConfig>()
        .init_resource::<ControllerInspector>()
        .add_observer(toggle_controller_inspector);
    }
}

/// Whether the controller config inspector window is open.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControllerInspector(pub bool);

impl ControllerInspector {
    const fn toggle(&mut self) { self.0 = !self.0; }
}

fn toggle_controller_inspector(
    _trigger: On<Start<ToggleControllerInspector>>,
    mut inspector: ResMut<ControllerInspector>,
) {
    inspector.toggle();
    debug!("controller inspector open: {}", inspector.0);
}

/// Tunables for the mouse controller. Angles are in degrees.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct ControllerConfig {
    /// Degrees of yaw (x) and pitch (y) per pixel of drag
    pub look_sensitivity:      Vec2,
    /// How quickly the camera catches up with the dragged rotation, per second
    #[inspector(min = 1.0, max = 60.0, display = NumberDisplay::Slider)]
    pub look_smoothing:        f32,
    #[inspector(min = 0.0, max = 89.9, display = NumberDisplay::Slider)]
    pub max_pitch:             f32,
    /// Seconds a press may be held and still count as a click
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub short_click_threshold: f32,
    /// Degrees of field of view per scroll line
    #[inspector(min = 0.1, max = 50.0, display = NumberDisplay::Slider)]
    pub fov_sensitivity:       f32,
    #[inspector(min = 1.0, max = 179.0, display = NumberDisplay::Slider)]
    pub min_fov:               f32,
    #[inspector(min = 1.0, max = 179.0, display = NumberDisplay::Slider)]
    pub max_fov:               f32,
    /// Field of view on startup and after every jump
    #[inspector(min = 1.0, max = 179.0, display = NumberDisplay::Slider)]
    pub default_fov:           f32,
    /// Field of view the jump zooms into before switching spheres
    #[inspector(min = 1.0, max = 179.0, display = NumberDisplay::Slider)]
    pub teleport_fov:          f32,
    /// Degrees per second
    #[inspector(min = 1.0, max = 1000.0, display = NumberDisplay::Slider)]
    pub teleport_zoom_speed:   f32,
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub marker_aim_scale:      f32,
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub marker_idle_scale:     f32,
    #[inspector(min = 1.0, max = 10_000.0)]
    pub ray_max_distance:      f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            look_sensitivity:      Vec2::splat(0.15),
            look_smoothing:        12.0,
            max_pitch:             85.0,
            short_click_threshold: 0.15,
            fov_sensitivity:       5.0,
            min_fov:               20.0,
            max_fov:               100.0,
            default_fov:           60.0,
            teleport_fov:          30.0,
            teleport_zoom_speed:   200.0,
            marker_aim_scale:      1.0,
            marker_idle_scale:     0.1,
            ray_max_distance:      1000.0,
        }
    }
}

impl ControllerConfig {
    /// Scroll clamp range, ordered even if the inspector left `min_fov` above
    /// `max_fov`.
    pub const fn fov_range(&self) -> (f32, f32) {
        if self.min_fov <= self.max_fov {
            (self.min_fov, self.max_fov)
        } else {
            (self.max_fov, self.min_fov)
        }
    }

    pub const fn marker_scale(&self, over_teleport_zone: bool) -> f32 {
        if over_teleport_zone {
            self.marker_aim_scale
        } else {
            self.marker_idle_scale
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[test]
    fn inspector_opens_and_closes_on_alternate_presses() {
        let mut world = World::new();
        world.init_resource::<ControllerInspector>();
        let open = |world: &mut World| {
            world
                .run_system_once(resource_equals(ControllerInspector(true)))
                .expect("condition should run")
        };

        assert!(!open(&mut world));
        world.resource_mut::<ControllerInspector>().toggle();
        assert!(open(&mut world));
        world.resource_mut::<ControllerInspector>().toggle();
        assert!(!open(&mut world));
    }

    #[test]
    fn fov_range_is_ordered() {
        let config = ControllerConfig {
            min_fov: 90.0,
            max_fov: 30.0,
            ..default()
        };
        assert_eq!(config.fov_range(), (30.0, 90.0));
        assert_eq!(ControllerConfig::default().fov_range(), (20.0, 100.0));
    }

    #[test]
    fn marker_is_full_size_only_over_a_zone() {
        let config = ControllerConfig::default();
        assert!((config.marker_scale(true) - 1.0).abs() < f32::EPSILON);
        assert!((config.marker_scale(false) - 0.1).abs() < f32::EPSILON);
    }
}
