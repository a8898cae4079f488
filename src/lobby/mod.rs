pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

/// 菜单 → 选角色 → 选田
pub struct LobbyPlugin;
impl Plugin for LobbyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StartGame>()
            .add_event::<SelectCharacter>()
            .add_event::<ConfirmCharacter>()
            .add_event::<ChooseField>()
            .add_systems(Update, (start_game, describe_menu).run_if(in_state(AppState::Menu)))
            .add_systems(
                Update,
                (select_character, confirm_character, describe_characters)
                    .run_if(in_state(AppState::CharacterSelect)),
            )
            .add_systems(
                Update,
                (choose_field, describe_fields).run_if(in_state(AppState::FieldSelect)),
            );
    }
}
