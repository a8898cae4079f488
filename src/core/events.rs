use bevy::prelude::*;

use super::resources::GameConfig;

/// 给玩家看的一句话，由 main 里的 forward_log_event 打印
#[derive(Event)]
pub struct LogEvent(pub String);

/// 请求当前场景描述自己（look 命令）
#[derive(Event)]
pub struct DescribeScene;

pub fn welcome(mut writer: EventWriter<LogEvent>, config: Res<GameConfig>) {
    writer.write(LogEvent(format!(
        "欢迎来到 Pick and Feast！蓝莓 ${:.2} / lb，输入 help 查看命令",
        config.price_per_lb
    )));
}
