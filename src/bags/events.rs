use bevy::prelude::*;

use super::components::BagSize;

/// 选袋界面的 + / - 按钮
#[derive(Event)]
pub struct AdjustBag {
    pub size: BagSize,
    pub delta: i32,
}

/// “Go to Field”
#[derive(Event)]
pub struct ConfirmBags;
