use bevy::prelude::*;

/// 单击吃一颗，双击整丛装袋
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestAction {
    Eat,
    Pick,
}

#[derive(Event)]
pub struct HarvestBush {
    pub column: u32,
    pub position: u32,
    pub action: HarvestAction,
}

/// “Weigh Bags”
#[derive(Event)]
pub struct FinishPicking;
