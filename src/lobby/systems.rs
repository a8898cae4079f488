use super::events::*;
use crate::core::events::{DescribeScene, LogEvent};
use crate::core::{resources::GameConfig, states::AppState};
use crate::data::schema::FieldCatalog;
use crate::session::{Character, Session, SessionCounter};
use bevy::prelude::*;

/// 开新局，名字为空用默认名
pub fn start_game(
    mut ev_start: EventReader<StartGame>,
    mut session: ResMut<Session>,
    mut counter: ResMut<SessionCounter>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
    config: Res<GameConfig>,
) {
    // 同一帧多次 start 只认最后一次
    let Some(ev) = ev_start.read().last() else {
        return;
    };
    *session = Session::begin(&ev.name, &config.default_player_name, &mut counter);
    info!("新会话 {} ({})", session.id, session.player_name);
    log.write(LogEvent(format!("Welcome, {}!", session.player_name)));
    next.set(AppState::CharacterSelect);
}

pub fn describe_menu(mut ev_describe: EventReader<DescribeScene>, mut log: EventWriter<LogEvent>) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    log.write(LogEvent("Pick and Feast · 输入 start [名字] 开始".into()));
}

pub fn select_character(
    mut ev_select: EventReader<SelectCharacter>,
    mut session: ResMut<Session>,
    mut log: EventWriter<LogEvent>,
) {
    for SelectCharacter(character) in ev_select.read() {
        session.character = *character;
        log.write(LogEvent(format!("已选择角色 {}", character.key())));
    }
}

pub fn confirm_character(
    mut ev_confirm: EventReader<ConfirmCharacter>,
    mut next: ResMut<NextState<AppState>>,
    session: Res<Session>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_confirm.is_empty() {
        return;
    }
    ev_confirm.clear();
    log.write(LogEvent(format!("{} 出发！", session.character.key())));
    next.set(AppState::FieldSelect);
}

pub fn describe_characters(
    mut ev_describe: EventReader<DescribeScene>,
    mut log: EventWriter<LogEvent>,
    session: Res<Session>,
) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    for character in [Character::Human1, Character::Human2] {
        let mark = if character == session.character { "*" } else { " " };
        log.write(LogEvent(format!("{mark} {}", character.key())));
    }
}

/// 只有开放的田可以进
pub fn choose_field(
    mut ev_choose: EventReader<ChooseField>,
    mut session: ResMut<Session>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
    catalog: Res<FieldCatalog>,
) {
    for ev in ev_choose.read() {
        match catalog.find_active(&ev.name) {
            Ok(field) => {
                session.field = Some(field.name.clone());
                log.write(LogEvent(format!("{} Field U-Pick", field.name)));
                next.set(AppState::BagSelect);
                return;
            }
            Err(err) => {
                log.write(LogEvent(format!("无法进入: {err}")));
            }
        }
    }
}

pub fn describe_fields(
    mut ev_describe: EventReader<DescribeScene>,
    mut log: EventWriter<LogEvent>,
    session: Res<Session>,
    catalog: Res<FieldCatalog>,
) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    log.write(LogEvent(format!("Welcome, {}! 可选的田：", session.player_name)));
    for field in &catalog.fields {
        let state = if field.active { "开放" } else { "未开放" };
        log.write(LogEvent(format!("  {} Field ({state})", field.name)));
    }
}
