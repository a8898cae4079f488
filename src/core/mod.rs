use bevy::prelude::*;

pub mod error;
pub mod events;
pub mod resources;
pub mod states;

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        // main 里已插入读自文件的 GameConfig 时，init_resource 不会覆盖
        app.init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .add_event::<events::DescribeScene>()
            .init_resource::<resources::GameConfig>()
            .add_systems(Startup, events::welcome);
    }
}
