use bevy::prelude::*;

mod bags;
mod checkout;
mod core;
mod data;
mod interface;
mod kitchen;
mod lobby;
mod picking;
mod session;
mod weighing;


use crate::core::{resources, states, CorePlugin};
use interface::debug_cli::DebugCliPlugin;

fn main() -> anyhow::Result<()> {
    // 配置有误直接退出，不启动窗口
    let config = resources::GameConfig::load_or_default(resources::CONFIG_PATH)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }), // 不显示窗口，全部通过命令行操作
            ..default()
        }))
        .insert_resource(config)
        .add_plugins(CorePlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(GamePlugins)
        .add_plugins(DebugCliPlugin)
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();

    Ok(())
}

/// 各个场景的玩法插件
pub struct GamePlugins;
impl Plugin for GamePlugins {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            session::SessionPlugin,
            lobby::LobbyPlugin,
            bags::BagsPlugin,
            picking::PickingPlugin,
            weighing::WeighingPlugin,
            checkout::CheckoutPlugin,
            kitchen::KitchenPlugin,
        ));
    }
}

fn forward_log_event(mut reader: EventReader<core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
