use super::{components::*, events::*};
use crate::bags::components::summarize_by_size;
use crate::core::events::{DescribeScene, LogEvent};
use crate::core::{resources::GameConfig, states::AppState};
use crate::session::Session;
use bevy::prelude::*;

/// 没有预先注入产量来源时，用配置里的种子建一个随机来源
pub fn init_yield_source(mut commands: Commands, existing: Option<Res<BushYields>>, config: Res<GameConfig>) {
    if existing.is_none() {
        commands.insert_resource(BushYields(Box::new(RandomYield::new(config.seed))));
    }
}

/// 进田时长出一片新灌木
pub fn generate_field(
    mut commands: Commands,
    mut yields: ResMut<BushYields>,
    config: Res<GameConfig>,
    session: Res<Session>,
    mut log: EventWriter<LogEvent>,
) {
    let field = Field::generate(
        config.field_columns,
        config.bushes_per_column,
        config.yield_min,
        config.yield_max,
        yields.0.as_mut(),
    );
    debug!("田里共 {} 丛，{} 颗浆果", field.bushes.len(), field.berries_left());
    log.write(LogEvent(format!(
        "{} Field U-Pick · ${:.2} per lb · eat <列> <位> 吃一颗，pick <列> <位> 装袋",
        session.field.as_deref().unwrap_or("Blueberry"),
        config.price_per_lb
    )));
    commands.insert_resource(field);
}

/// 吃：灌木少一颗；摘：整丛按顺序装袋，装不下的丢掉
pub fn harvest_bush(
    mut ev_harvest: EventReader<HarvestBush>,
    mut field: ResMut<Field>,
    mut session: ResMut<Session>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_harvest.read() {
        let bush = match field.bush_mut(ev.column, ev.position) {
            Ok(bush) => bush,
            Err(err) => {
                log.write(LogEvent(format!("{err}")));
                continue;
            }
        };

        if !bush.has_berries() {
            log.write(LogEvent("这丛已经摘光了".into()));
            continue;
        }

        match ev.action {
            HarvestAction::Eat => {
                bush.berries -= 1;
                log.write(LogEvent("Yumm! 😋".into()));
            }
            HarvestAction::Pick => {
                let harvest = HarvestYield::from(bush.berries);
                let allocation = allocate(harvest, &mut session.bags);
                // 装不下的留在灌木上
                bush.berries = allocation.discarded;
                for (index, added) in &allocation.fills {
                    let bag = &session.bags[*index];
                    log.write(LogEvent(format!(
                        "{added} 颗装进 #{index} {} 袋（{}/{}）",
                        bag.size.name(),
                        bag.filled,
                        bag.capacity
                    )));
                }
                if allocation.discarded > 0 {
                    debug!("袋子已满，{} 颗留在灌木上", allocation.discarded);
                    log.write(LogEvent(format!("袋子装不下了，还剩 {} 颗", allocation.discarded)));
                }
                for line in bag_status(&session) {
                    log.write(LogEvent(line));
                }
            }
        }
    }
}

pub fn finish_picking(mut ev_finish: EventReader<FinishPicking>, mut next: ResMut<NextState<AppState>>) {
    if ev_finish.is_empty() {
        return;
    }
    ev_finish.clear();
    next.set(AppState::Weigh);
}

pub fn describe_field(
    mut ev_describe: EventReader<DescribeScene>,
    mut log: EventWriter<LogEvent>,
    field: Res<Field>,
    session: Res<Session>,
) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();

    for column in 0..field.columns {
        let row: String = field
            .bushes
            .iter()
            .filter(|b| b.column == column)
            .map(|b| format!("{:>3}", b.berries))
            .collect();
        log.write(LogEvent(format!("列 {column}:{row}")));
    }
    log.write(LogEvent(format!(
        "还有 {} 丛有果，共 {} 颗",
        field.bushes_with_berries(),
        field.berries_left()
    )));
    for line in bag_status(&session) {
        log.write(LogEvent(line));
    }
}

/// 右侧 “Your Bags” 面板
fn bag_status(session: &Session) -> Vec<String> {
    summarize_by_size(&session.bags)
        .into_iter()
        .map(|(size, filled, capacity, count)| {
            let name = size.name();
            let mut title = name[..1].to_uppercase();
            title.push_str(&name[1..]);
            if count > 1 {
                format!("{title} x{count}: {filled}/{capacity} berries")
            } else {
                format!("{title}: {filled}/{capacity} berries")
            }
        })
        .collect()
}
