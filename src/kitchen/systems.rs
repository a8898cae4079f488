use super::{components::*, events::*};
use crate::core::events::{DescribeScene, LogEvent};
use crate::core::{resources::GameConfig, states::AppState};
use crate::session::Session;
use bevy::prelude::*;

pub fn start_baking(
    mut commands: Commands,
    config: Res<GameConfig>,
    session: Res<Session>,
    mut log: EventWriter<LogEvent>,
) {
    commands.insert_resource(Oven::new(config.bake_seconds));
    log.write(LogEvent(format!("Baking Time, {}!", session.player_name)));
    log.write(LogEvent("派皮和蓝莓进了烤箱 · Baking...".into()));
}

pub fn tick_oven(time: Res<Time>, mut oven: ResMut<Oven>, mut log: EventWriter<LogEvent>) {
    oven.timer.tick(time.delta());
    if oven.timer.just_finished() {
        log.write(LogEvent("Done! Baked Pie! · 输入 eat 开吃".into()));
    }
}

/// 烤好了才能端上桌
pub fn serve_pie(
    mut ev_serve: EventReader<ServePie>,
    oven: Res<Oven>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_serve.is_empty() {
        return;
    }
    ev_serve.clear();

    if !oven.is_done() {
        log.write(LogEvent(format!(
            "还在烤，再等 {:.1} 秒",
            oven.timer.remaining_secs()
        )));
        return;
    }
    next.set(AppState::Eat);
}

pub fn describe_oven(mut ev_describe: EventReader<DescribeScene>, mut log: EventWriter<LogEvent>, oven: Res<Oven>) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    if oven.is_done() {
        log.write(LogEvent("Baked Pie!".into()));
    } else {
        log.write(LogEvent(format!("Baking... {:.0}%", oven.timer.fraction() * 100.0)));
    }
}

pub fn set_table(
    mut commands: Commands,
    config: Res<GameConfig>,
    session: Res<Session>,
    mut log: EventWriter<LogEvent>,
) {
    commands.insert_resource(Pie::new(config.pie_bites));
    log.write(LogEvent(format!("Yummy, {}! · Click to eat (bite)", session.player_name)));
}

pub fn take_bite(mut ev_bite: EventReader<TakeBite>, mut pie: ResMut<Pie>, mut log: EventWriter<LogEvent>) {
    for _ in ev_bite.read() {
        if pie.is_gone() {
            continue;
        }
        if pie.bite() {
            log.write(LogEvent("All gone! · 输入 again 再玩一次".into()));
        } else {
            log.write(LogEvent(format!("*crunch* 还剩 {}/{}", pie.bites_left, pie.bites_total)));
        }
    }
}

/// 吃光了才出现 “Play Again”
pub fn play_again(
    mut ev_again: EventReader<PlayAgain>,
    pie: Res<Pie>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_again.is_empty() {
        return;
    }
    ev_again.clear();

    if !pie.is_gone() {
        log.write(LogEvent("先把派吃完".into()));
        return;
    }
    next.set(AppState::Menu);
}

pub fn describe_pie(mut ev_describe: EventReader<DescribeScene>, mut log: EventWriter<LogEvent>, pie: Res<Pie>) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    log.write(LogEvent(format!(
        "派还剩 {:.0}%",
        pie.remaining_ratio() * 100.0
    )));
}
