pub mod components;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

pub struct BagsPlugin;
impl Plugin for BagsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<components::BagSelection>()
            .add_event::<AdjustBag>()
            .add_event::<ConfirmBags>()
            .add_systems(OnEnter(AppState::BagSelect), reset_selection)
            .add_systems(
                Update,
                (adjust_bag_count, confirm_bags, describe_selection)
                    .chain()
                    .run_if(in_state(AppState::BagSelect)),
            );
    }
}
