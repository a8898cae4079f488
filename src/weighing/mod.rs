pub mod components;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use components::Scale;
use events::*;
use systems::*;

pub struct WeighingPlugin;
impl Plugin for WeighingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scale>()
            .add_event::<PlaceBag>()
            .add_event::<LiftBag>()
            .add_event::<RequestBarcode>()
            .add_systems(OnEnter(AppState::Weigh), setup_scale)
            .add_systems(
                Update,
                (move_bags, request_barcode, describe_scale)
                    .chain()
                    .run_if(in_state(AppState::Weigh)),
            );
    }
}
