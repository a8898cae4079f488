use bevy::prelude::*;

use crate::session::Character;

/// 菜单里输入名字开始
#[derive(Event)]
pub struct StartGame {
    pub name: String,
}

#[derive(Event)]
pub struct SelectCharacter(pub Character);

/// 角色选好了，去选田
#[derive(Event)]
pub struct ConfirmCharacter;

#[derive(Event)]
pub struct ChooseField {
    pub name: String,
}
