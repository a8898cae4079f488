use bevy::prelude::*;

/// 烤箱：计时结束前派还没好
#[derive(Resource, Debug, Clone)]
pub struct Oven {
    pub timer: Timer,
}

impl Oven {
    pub fn new(seconds: f32) -> Self {
        Self {
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }

    pub fn is_done(&self) -> bool {
        self.timer.finished()
    }
}

/// 吃派：每口减一，吃完为止
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pie {
    pub bites_left: u32,
    pub bites_total: u32,
}

impl Pie {
    pub fn new(bites: u32) -> Self {
        Self {
            bites_left: bites,
            bites_total: bites,
        }
    }

    /// 咬一口，返回是否吃光
    pub fn bite(&mut self) -> bool {
        self.bites_left = self.bites_left.saturating_sub(1);
        self.is_gone()
    }

    pub fn is_gone(&self) -> bool {
        self.bites_left == 0
    }

    /// 剩余比例，原版用来缩小派的贴图
    pub fn remaining_ratio(&self) -> f32 {
        self.bites_left as f32 / self.bites_total.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pie_is_gone_after_all_bites() {
        let mut pie = Pie::new(5);
        for _ in 0..4 {
            assert!(!pie.bite());
        }
        assert_eq!(pie.remaining_ratio(), 0.2);
        assert!(pie.bite());
        assert!(pie.bite());
        assert_eq!(pie.bites_left, 0);
    }

    #[test]
    fn oven_finishes_after_its_timer() {
        let mut oven = Oven::new(3.0);
        oven.timer.tick(Duration::from_secs_f32(1.0));
        assert!(!oven.is_done());
        oven.timer.tick(Duration::from_secs_f32(2.5));
        assert!(oven.is_done());
    }
}
