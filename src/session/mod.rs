//! 一局游戏的全部状态：场景之间只通过它交接数据

use bevy::prelude::*;
use uuid::Uuid;

use crate::bags::components::BagInstance;
use crate::core::{error::GameError, states::AppState};

/// 注册会话资源；回到菜单时清空上一局
pub struct SessionPlugin;
impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .init_resource::<SessionCounter>()
            .add_systems(OnEnter(AppState::Menu), reset_session);
    }
}

fn reset_session(mut session: ResMut<Session>) {
    *session = Session::default();
}

/// 可选角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Character {
    #[default]
    Human1,
    Human2,
}

impl Character {
    pub fn key(self) -> &'static str {
        match self {
            Character::Human1 => "human1",
            Character::Human2 => "human2",
        }
    }

    /// 接受 1 / 2 或 human1 / human2
    pub fn parse(token: &str) -> Result<Self, GameError> {
        match token.to_lowercase().as_str() {
            "1" | "human1" => Ok(Character::Human1),
            "2" | "human2" => Ok(Character::Human2),
            other => Err(GameError::invalid(format!("unknown character `{other}`"))),
        }
    }
}

/// 本进程开过几局，用来区分同名玩家的会话
#[derive(Resource, Debug, Default)]
pub struct SessionCounter(pub u64);

#[derive(Resource, Debug, Clone, Default)]
pub struct Session {
    pub id: Uuid,
    pub player_name: String,
    pub character: Character,
    pub field: Option<String>,
    /// 选袋后生成，采摘时填充，称重时读取
    pub bags: Vec<BagInstance>,
    /// 已确认称过的总重（磅）
    pub weight: f32,
    /// 扫码后算出的总价
    pub price: f32,
}

impl Session {
    /// 开新局；名字为空时用默认名
    pub fn begin(name: &str, default_name: &str, counter: &mut SessionCounter) -> Self {
        let trimmed = name.trim();
        let player_name = if trimmed.is_empty() { default_name } else { trimmed }.to_string();
        counter.0 += 1;
        let seed = format!("{}#{}", player_name, counter.0);
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()),
            player_name,
            ..Default::default()
        }
    }

    pub fn total_filled(&self) -> u32 {
        self.bags.iter().map(|b| b.filled).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_falls_back_to_default() {
        let mut counter = SessionCounter::default();
        let session = Session::begin("   ", "Berry Muncher", &mut counter);
        assert_eq!(session.player_name, "Berry Muncher");
        assert!(session.bags.is_empty());
        assert_eq!(session.weight, 0.0);
    }

    #[test]
    fn each_session_gets_a_distinct_id() {
        let mut counter = SessionCounter::default();
        let first = Session::begin("Ann", "x", &mut counter);
        let second = Session::begin("Ann", "x", &mut counter);
        assert_ne!(first.id, second.id);
        assert_eq!(counter.0, 2);
    }

    #[test]
    fn character_parse() {
        assert_eq!(Character::parse("2").unwrap(), Character::Human2);
        assert_eq!(Character::parse("HUMAN1").unwrap(), Character::Human1);
        assert!(Character::parse("elf").is_err());
    }
}
