use bevy::prelude::*;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum ViewerSet {
    UserInput,
    EntityUpdates,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        // input decides what the controller wants this frame, entity updates
        // push the result onto transforms and projections
        app.configure_sets(
            Update,
            (ViewerSet::UserInput, ViewerSet::EntityUpdates).chain(),
        );
    }
}
