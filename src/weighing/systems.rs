use super::{components::*, events::*};
use crate::bags::components::BagSizeTable;
use crate::core::events::{DescribeScene, LogEvent};
use crate::core::states::AppState;
use crate::session::Session;
use bevy::prelude::*;

/// 进称重台时按会话里的袋子算出每袋重量（先不显示）
pub fn setup_scale(
    mut commands: Commands,
    session: Res<Session>,
    table: Res<BagSizeTable>,
    mut log: EventWriter<LogEvent>,
    mut app_exit: EventWriter<AppExit>,
) {
    match weigh_bags(&session.bags, &table) {
        Ok(bags) => {
            log.write(LogEvent(format!(
                "Weighing Station · {} 个袋子待称，place <i> 放上秤，lift <i> 拿下",
                bags.len()
            )));
            commands.insert_resource(Scale::new(bags));
        }
        Err(err) => {
            error!("无法称重: {err}");
            app_exit.write(AppExit::error());
        }
    }
}

/// 放上 / 拿下秤，同一帧内按事件类型分别处理
pub fn move_bags(
    mut ev_place: EventReader<PlaceBag>,
    mut ev_lift: EventReader<LiftBag>,
    mut scale: ResMut<Scale>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_place.read() {
        match scale.place(ev.index) {
            Ok(first) => {
                let slot = scale.slots[ev.index];
                log.write(LogEvent(format!(
                    "#{} {} 袋: {:.2} lb · 秤显示 {:.2} lb",
                    ev.index,
                    slot.bag.size.name(),
                    slot.bag.weight,
                    scale.reading()
                )));
                if first {
                    log.write(LogEvent(format!(
                        "Bags Weighed: {}/{} · Total Weighed: {:.2} lb",
                        scale.weighed_count(),
                        scale.slots.len(),
                        scale.confirmed_weight()
                    )));
                }
            }
            Err(err) => {
                log.write(LogEvent(format!("{err}")));
            }
        }
    }

    for ev in ev_lift.read() {
        match scale.lift(ev.index) {
            Ok(true) => {
                log.write(LogEvent(format!("秤显示 {:.2} lb", scale.reading())));
            }
            Ok(false) => {
                log.write(LogEvent(format!("#{} 不在秤上", ev.index)));
            }
            Err(err) => {
                log.write(LogEvent(format!("{err}")));
            }
        }
    }
}

/// 全部称过才能拿条码；确认总重写回会话
pub fn request_barcode(
    mut ev_request: EventReader<RequestBarcode>,
    scale: Res<Scale>,
    mut session: ResMut<Session>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_request.is_empty() {
        return;
    }
    ev_request.clear();

    if !scale.ready_for_barcode() {
        log.write(LogEvent("Please weigh all bags first!".into()));
        return;
    }

    session.weight = scale.confirmed_weight();
    info!("确认总重 {:.2} lb", session.weight);
    next.set(AppState::Barcode);
}

pub fn describe_scale(mut ev_describe: EventReader<DescribeScene>, mut log: EventWriter<LogEvent>, scale: Res<Scale>) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();

    for (index, slot) in scale.slots.iter().enumerate() {
        let place = if slot.on_scale { "秤上" } else { "台面" };
        // 称过之前不显示重量
        let weight = if slot.weighed {
            format!("{:.2} lb", slot.bag.weight)
        } else {
            "?".to_string()
        };
        log.write(LogEvent(format!(
            "[{index}] {} {}/{} berries ({:.0}%) · {place} · {weight}",
            slot.bag.size.name(),
            slot.bag.filled,
            slot.bag.capacity,
            slot.bag.fill_ratio() * 100.0
        )));
    }
    log.write(LogEvent(format!(
        "秤显示 {:.2} lb · Bags Weighed: {}/{} · Total Weighed: {:.2} lb",
        scale.reading(),
        scale.weighed_count(),
        scale.slots.len(),
        scale.confirmed_weight()
    )));
}
