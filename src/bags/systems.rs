use super::{components::*, events::*};
use crate::core::events::{DescribeScene, LogEvent};
use crate::core::{resources::GameConfig, states::AppState};
use crate::session::Session;
use bevy::prelude::*;

pub fn reset_selection(mut commands: Commands) {
    commands.insert_resource(BagSelection::default());
}

/// 处理 + / -，超出范围时数量保持不变
pub fn adjust_bag_count(
    mut ev_adjust: EventReader<AdjustBag>,
    mut selection: ResMut<BagSelection>,
    mut log: EventWriter<LogEvent>,
    config: Res<GameConfig>,
) {
    for ev in ev_adjust.read() {
        match selection.adjust(ev.size, ev.delta, config.max_bags_per_size) {
            Ok(count) => {
                log.write(LogEvent(format!("{}: {count}", ev.size.name())));
            }
            Err(err) => {
                warn!("{err}");
                log.write(LogEvent(format!(
                    "每种袋子只能选 0~{} 个（{} 当前 {}）",
                    config.max_bags_per_size,
                    ev.size.name(),
                    selection.count(ev.size)
                )));
            }
        }
    }
}

/// 至少选一个袋子才能下田；确认后生成袋子序列交给会话
pub fn confirm_bags(
    mut ev_confirm: EventReader<ConfirmBags>,
    selection: Res<BagSelection>,
    table: Res<BagSizeTable>,
    mut session: ResMut<Session>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_confirm.is_empty() {
        return;
    }
    ev_confirm.clear();

    if selection.total() == 0 {
        log.write(LogEvent("Please select at least one bag!".into()));
        return;
    }

    session.bags = build_bag_inventory(&selection, &table);
    info!("带上 {} 个袋子下田", session.bags.len());
    next.set(AppState::Pick);
}

pub fn describe_selection(
    mut ev_describe: EventReader<DescribeScene>,
    mut log: EventWriter<LogEvent>,
    selection: Res<BagSelection>,
    table: Res<BagSizeTable>,
) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    for spec in table.iter() {
        log.write(LogEvent(format!(
            "{:<14} x{}  ({} berries)",
            spec.label,
            selection.count(spec.size),
            spec.capacity
        )));
    }
}
