use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::Start;

use crate::viewer_input::TogglePhysicsDebug;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(avian3d::PhysicsPlugins::default())
            .add_plugins(PhysicsDebugPlugin)
            // the viewer only casts rays against static colliders
            .insert_resource(Gravity::ZERO)
            .add_systems(Startup, init_physics_debug)
            .add_observer(toggle_physics_debug);
    }
}

fn init_physics_debug(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<PhysicsGizmos>();
    config.enabled = false;
}

fn toggle_physics_debug(
    _trigger: On<Start<TogglePhysicsDebug>>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let (config, _) = config_store.config_mut::<PhysicsGizmos>();
    config.enabled = !config.enabled;
    info!("physics debug: {}", config.enabled);
}
