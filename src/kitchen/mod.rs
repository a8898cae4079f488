pub mod components;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

/// 烤派 + 吃派
pub struct KitchenPlugin;
impl Plugin for KitchenPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ServePie>()
            .add_event::<TakeBite>()
            .add_event::<PlayAgain>()
            .add_systems(OnEnter(AppState::Cook), start_baking)
            .add_systems(
                Update,
                (tick_oven, serve_pie, describe_oven)
                    .chain()
                    .run_if(in_state(AppState::Cook)),
            )
            .add_systems(OnEnter(AppState::Eat), set_table)
            .add_systems(
                Update,
                (take_bite, play_again, describe_pie)
                    .chain()
                    .run_if(in_state(AppState::Eat)),
            );
    }
}
