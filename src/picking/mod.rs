pub mod components;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use components::Field;
use events::*;
use systems::*;

pub struct PickingPlugin;
impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Field>()
            .add_event::<HarvestBush>()
            .add_event::<FinishPicking>()
            .add_systems(Startup, init_yield_source)
            .add_systems(OnEnter(AppState::Pick), generate_field)
            .add_systems(
                Update,
                (harvest_bush, finish_picking, describe_field)
                    .chain()
                    .run_if(in_state(AppState::Pick)),
            );
    }
}
