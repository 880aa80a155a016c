use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

pub struct ViewerInputPlugin;

impl Plugin for ViewerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin)
            .add_input_context::<ViewerContext>()
            .add_systems(Startup, spawn_viewer_context);
    }
}

/// Input context for everything the viewer listens to. There is exactly one
/// context entity for the lifetime of the app.
#[derive(Component, Default)]
pub struct ViewerContext;

/// Raw mouse motion for drag rotation, in logical pixels this frame.
#[derive(InputAction)]
#[action_output(Vec2)]
pub struct Look;

/// Scroll wheel delta; only `y` drives the zoom.
#[derive(InputAction)]
#[action_output(Vec2)]
pub struct Zoom;

#[derive(InputAction)]
#[action_output(bool)]
pub struct ToggleControllerInspector;

#[derive(InputAction)]
#[action_output(bool)]
pub struct TogglePhysicsDebug;

fn spawn_viewer_context(mut commands: Commands) {
    commands.spawn((
        Name::new("Viewer Input Context"),
        ViewerContext,
        actions!(
            ViewerContext[
                (Action::<Look>::new(), bindings![Binding::mouse_motion()]),
                (Action::<Zoom>::new(), bindings![Binding::mouse_wheel()]),
                (
                    Action::<ToggleControllerInspector>::new(),
                    bindings![KeyCode::F1]
                ),
                (Action::<TogglePhysicsDebug>::new(), bindings![KeyCode::F2])
            ]
        ),
    ));

    debug!("viewer input context spawned");
}

/// Current value of a `Vec2` action, or zero when the context is missing.
pub fn axis_value<A>(action: &Query<&Action<A>>) -> Vec2
where
    A: InputAction<Output = Vec2>,
{
    action.iter().map(|value| **value).sum()
}
