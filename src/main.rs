//! Panosphere - a first-person panorama viewer built with Bevy 0.18
//!
//! - Drag to look around inside a panorama sphere
//! - Scroll to zoom the field of view
//! - Click a teleport zone to zoom in and jump to the sphere it leads to
//! - Bevy Remote Protocol (BRP) support for debugging

mod controller;
mod physics;
mod scene;
mod schedule;
mod viewer_input;

use bevy::prelude::*;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::controller::ControllerPlugin;
use crate::physics::PhysicsPlugin;
use crate::scene::ScenePlugin;
use crate::schedule::SchedulePlugin;
use crate::viewer_input::ViewerInputPlugin;

fn main() {
    let mut app = App::new();

    // Get effective port from BrpExtrasPlugin to include in window title if non-default
    let brp_plugin = BrpExtrasPlugin::default();
    let (effective_port, _) = brp_plugin.get_effective_port();
    let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
        "panosphere".to_string()
    } else {
        format!("panosphere - {effective_port}")
    };

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title.clone(),
            ..default()
        }),
        ..default()
    }));

    app.add_plugins((
        EguiPlugin::default(),
        brp_plugin,
        ControllerPlugin,
        PhysicsPlugin,
        ScenePlugin {
            title: window_title,
        },
        SchedulePlugin,
        ViewerInputPlugin,
    ))
    .run();
}
