use bevy::prelude::*;
use serde::Serialize;

use crate::bags::components::{BagInstance, BagSize, BagSizeTable};
use crate::core::error::GameError;

/// 称重时袋子的只读投影
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeighedBag {
    /// 在会话袋子序列中的下标
    pub bag: usize,
    pub size: BagSize,
    pub filled: u32,
    pub capacity: u32,
    /// 磅
    pub weight: f32,
}

impl WeighedBag {
    pub fn fill_ratio(&self) -> f32 {
        self.filled as f32 / self.capacity as f32
    }
}

/// 只看装了浆果的袋子：weight = max_weight * filled / capacity
pub fn weigh_bags(bags: &[BagInstance], table: &BagSizeTable) -> Result<Vec<WeighedBag>, GameError> {
    bags.iter()
        .enumerate()
        .filter(|(_, bag)| bag.filled > 0)
        .map(|(index, bag)| {
            if bag.capacity == 0 {
                return Err(GameError::config(format!(
                    "bag #{index} ({}) has zero capacity",
                    bag.size.name()
                )));
            }
            let spec = table.get(bag.size);
            Ok(WeighedBag {
                bag: index,
                size: bag.size,
                filled: bag.filled,
                capacity: bag.capacity,
                weight: spec.max_weight * (bag.filled as f32 / bag.capacity as f32),
            })
        })
        .collect()
}

/// 秤上的一格
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSlot {
    pub bag: WeighedBag,
    pub on_scale: bool,
    /// 至少放上过一次
    pub weighed: bool,
}

/// 称重台：显示读数 = 秤上袋子之和；确认总重 = 称过的袋子之和
#[derive(Resource, Debug, Clone, Default)]
pub struct Scale {
    pub slots: Vec<ScaleSlot>,
}

impl Scale {
    pub fn new(bags: Vec<WeighedBag>) -> Self {
        Self {
            slots: bags
                .into_iter()
                .map(|bag| ScaleSlot {
                    bag,
                    on_scale: false,
                    weighed: false,
                })
                .collect(),
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut ScaleSlot, GameError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or_else(|| GameError::invalid(format!("no bag #{index} at the station ({len} bags)")))
    }

    /// 放上秤；返回这次是否是首次称重
    pub fn place(&mut self, index: usize) -> Result<bool, GameError> {
        let slot = self.slot_mut(index)?;
        if slot.on_scale {
            return Ok(false);
        }
        slot.on_scale = true;
        let first = !slot.weighed;
        slot.weighed = true;
        Ok(first)
    }

    /// 拿下秤；只影响显示读数
    pub fn lift(&mut self, index: usize) -> Result<bool, GameError> {
        let slot = self.slot_mut(index)?;
        let was_on = slot.on_scale;
        slot.on_scale = false;
        Ok(was_on)
    }

    pub fn reading(&self) -> f32 {
        self.slots.iter().filter(|s| s.on_scale).map(|s| s.bag.weight).sum()
    }

    pub fn confirmed_weight(&self) -> f32 {
        self.slots.iter().filter(|s| s.weighed).map(|s| s.bag.weight).sum()
    }

    pub fn weighed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.weighed).count()
    }

    pub fn all_weighed(&self) -> bool {
        self.weighed_count() == self.slots.len()
    }

    /// 所有袋子称过且总重大于 0 才能去打码
    pub fn ready_for_barcode(&self) -> bool {
        self.all_weighed() && self.confirmed_weight() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(size: BagSize, capacity: u32, filled: u32) -> BagInstance {
        BagInstance { size, capacity, filled }
    }

    #[test]
    fn weight_follows_fill_ratio() {
        let table = BagSizeTable::standard();
        let bags = [bag(BagSize::Small, 10, 10), bag(BagSize::Medium, 20, 5)];
        let weighed = weigh_bags(&bags, &table).unwrap();
        assert_eq!(weighed.len(), 2);
        assert_eq!(weighed[0].weight, 1.0);
        assert_eq!(weighed[1].weight, 0.5);
        assert_eq!(weighed[1].fill_ratio(), 0.25);
    }

    #[test]
    fn empty_bags_are_left_out_but_indices_kept() {
        let table = BagSizeTable::standard();
        let bags = [
            bag(BagSize::Small, 10, 0),
            bag(BagSize::Medium, 20, 0),
            bag(BagSize::Large, 40, 30),
        ];
        let weighed = weigh_bags(&bags, &table).unwrap();
        assert_eq!(weighed.len(), 1);
        assert_eq!(weighed[0].bag, 2);
        assert_eq!(weighed[0].weight, 4.0 * (30.0 / 40.0));
    }

    #[test]
    fn weights_are_exact_and_bounded_for_every_fill() {
        let table = BagSizeTable::standard();
        for size in BagSize::ALL {
            let spec = table.get(size);
            for filled in 1..=spec.capacity {
                let weighed = weigh_bags(&[bag(size, spec.capacity, filled)], &table).unwrap();
                let expected = spec.max_weight * (filled as f32 / spec.capacity as f32);
                assert_eq!(weighed[0].weight, expected);
                assert!(weighed[0].weight > 0.0 && weighed[0].weight <= spec.max_weight);
            }
        }
    }

    #[test]
    fn weighing_twice_gives_the_same_answer() {
        let table = BagSizeTable::standard();
        let bags = [bag(BagSize::Small, 10, 3), bag(BagSize::Large, 40, 17)];
        assert_eq!(weigh_bags(&bags, &table).unwrap(), weigh_bags(&bags, &table).unwrap());
    }

    #[test]
    fn zero_capacity_bag_is_a_configuration_error() {
        let table = BagSizeTable::standard();
        let err = weigh_bags(&[bag(BagSize::Small, 0, 1)], &table).unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));
    }

    #[test]
    fn scale_counts_first_placement_only() {
        let table = BagSizeTable::standard();
        let bags = [bag(BagSize::Small, 10, 10), bag(BagSize::Medium, 20, 5)];
        let mut scale = Scale::new(weigh_bags(&bags, &table).unwrap());

        assert!(scale.place(0).unwrap());
        assert!(!scale.place(0).unwrap());
        assert_eq!(scale.reading(), 1.0);
        assert!(!scale.ready_for_barcode());

        assert!(scale.lift(0).unwrap());
        assert_eq!(scale.reading(), 0.0);
        assert_eq!(scale.confirmed_weight(), 1.0);

        // 拿下后再放上不会重复计入
        assert!(!scale.place(0).unwrap());
        assert!(scale.place(1).unwrap());
        assert_eq!(scale.reading(), 1.5);
        assert_eq!(scale.confirmed_weight(), 1.5);
        assert_eq!(scale.weighed_count(), 2);
        assert!(scale.ready_for_barcode());
    }

    #[test]
    fn scale_rejects_unknown_bag() {
        let mut scale = Scale::default();
        assert!(matches!(scale.place(0), Err(GameError::InvalidArgument(_))));
        assert!(scale.lift(3).is_err());
        // 什么都没装时不能去打码
        assert!(!scale.ready_for_barcode());
    }
}
