use bevy::prelude::*;

/// 游戏运行的大状态：除 Startup / Loading 外，每个变体对应一个场景
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    Loading,
    Menu,
    CharacterSelect,
    FieldSelect,
    BagSelect,
    Pick,
    Weigh,
    Barcode,
    Checkout,
    Cook,
    Eat,
}

impl AppState {
    /// 场景标题，用于 status / look 输出
    pub fn title(&self) -> &'static str {
        match self {
            AppState::Startup | AppState::Loading => "Loading",
            AppState::Menu => "Pick and Feast",
            AppState::CharacterSelect => "Choose Your Character",
            AppState::FieldSelect => "Select a Field",
            AppState::BagSelect => "Select Bags",
            AppState::Pick => "U-Pick Field",
            AppState::Weigh => "Weighing Station",
            AppState::Barcode => "Barcode",
            AppState::Checkout => "Checkout",
            AppState::Cook => "Baking Time",
            AppState::Eat => "Yummy",
        }
    }
}
