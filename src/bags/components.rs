use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::GameError;

/// 袋子尺寸；声明顺序即装填顺序（小袋先装）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BagSize {
    Small,
    Medium,
    Large,
}

impl BagSize {
    pub const ALL: [BagSize; 3] = [BagSize::Small, BagSize::Medium, BagSize::Large];

    pub fn index(self) -> usize {
        match self {
            BagSize::Small => 0,
            BagSize::Medium => 1,
            BagSize::Large => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BagSize::Small => "small",
            BagSize::Medium => "medium",
            BagSize::Large => "large",
        }
    }

    /// 命令行里的尺寸名，接受全名或首字母
    pub fn parse(token: &str) -> Result<Self, GameError> {
        match token.to_lowercase().as_str() {
            "small" | "s" => Ok(BagSize::Small),
            "medium" | "m" => Ok(BagSize::Medium),
            "large" | "l" => Ok(BagSize::Large),
            other => Err(GameError::invalid(format!("unknown bag size `{other}`"))),
        }
    }
}

/// 某一尺寸的固定参数
#[derive(Debug, Clone, PartialEq)]
pub struct BagSizeSpec {
    pub size: BagSize,
    pub label: String,
    /// 能装多少颗浆果
    pub capacity: u32,
    /// 装满时的重量（磅）
    pub max_weight: f32,
}

impl BagSizeSpec {
    pub fn new(size: BagSize, label: impl Into<String>, capacity: u32, max_weight: f32) -> Result<Self, GameError> {
        if capacity == 0 {
            return Err(GameError::config(format!("{} bags need a positive capacity", size.name())));
        }
        if !max_weight.is_finite() || max_weight <= 0.0 {
            return Err(GameError::config(format!(
                "{} bags need a positive max weight, got {max_weight}",
                size.name()
            )));
        }
        Ok(Self {
            size,
            label: label.into(),
            capacity,
            max_weight,
        })
    }
}

/// 三种尺寸的参数表，启动时由目录数据校验生成，之后只读
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BagSizeTable {
    specs: [BagSizeSpec; 3],
}

impl BagSizeTable {
    /// 按任意顺序给出三种尺寸，缺失或重复都算配置错误
    pub fn new(specs: Vec<BagSizeSpec>) -> Result<Self, GameError> {
        let mut slots: [Option<BagSizeSpec>; 3] = [None, None, None];
        for spec in specs {
            let slot = &mut slots[spec.size.index()];
            if slot.is_some() {
                return Err(GameError::config(format!("duplicate entry for {} bags", spec.size.name())));
            }
            *slot = Some(spec);
        }
        let [small, medium, large] = slots;
        match (small, medium, large) {
            (Some(small), Some(medium), Some(large)) => Ok(Self {
                specs: [small, medium, large],
            }),
            (small, medium, _) => {
                let missing = if small.is_none() {
                    BagSize::Small
                } else if medium.is_none() {
                    BagSize::Medium
                } else {
                    BagSize::Large
                };
                Err(GameError::config(format!("no entry for {} bags", missing.name())))
            }
        }
    }

    /// 默认目录里的数值：10/20/40 颗，1/2/4 磅
    #[cfg(test)]
    pub fn standard() -> Self {
        let spec = |size, label: &str, capacity, max_weight| BagSizeSpec {
            size,
            label: label.to_string(),
            capacity,
            max_weight,
        };
        Self {
            specs: [
                spec(BagSize::Small, "Small (1lb)", 10, 1.0),
                spec(BagSize::Medium, "Medium (2lb)", 20, 2.0),
                spec(BagSize::Large, "Large (4lb)", 40, 4.0),
            ],
        }
    }

    pub fn get(&self, size: BagSize) -> &BagSizeSpec {
        &self.specs[size.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BagSizeSpec> {
        self.specs.iter()
    }
}

/// 一只实际的袋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BagInstance {
    pub size: BagSize,
    pub capacity: u32,
    /// 0..=capacity，只由采摘分配器增加
    pub filled: u32,
}

impl BagInstance {
    pub fn empty(spec: &BagSizeSpec) -> Self {
        Self {
            size: spec.size,
            capacity: spec.capacity,
            filled: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.filled)
    }
}

/// 选袋界面里每种尺寸的数量
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BagSelection {
    counts: [u32; 3],
}

impl BagSelection {
    pub fn count(&self, size: BagSize) -> u32 {
        self.counts[size.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// 数量必须落在 [0, limit]，否则原值不变
    pub fn set(&mut self, size: BagSize, count: i64, limit: u32) -> Result<(), GameError> {
        if count < 0 || count > i64::from(limit) {
            return Err(GameError::invalid(format!(
                "{} bag count must be within 0..={limit}, got {count}",
                size.name()
            )));
        }
        self.counts[size.index()] = count as u32;
        Ok(())
    }

    pub fn adjust(&mut self, size: BagSize, delta: i32, limit: u32) -> Result<u32, GameError> {
        let next = i64::from(self.count(size)) + i64::from(delta);
        self.set(size, next, limit)?;
        Ok(self.count(size))
    }
}

/// 把各尺寸数量展开成一串袋子：小、中、大依次排列
pub fn build_bag_inventory(selection: &BagSelection, table: &BagSizeTable) -> Vec<BagInstance> {
    BagSize::ALL
        .iter()
        .flat_map(|&size| {
            let spec = table.get(size);
            std::iter::repeat_n(BagInstance::empty(spec), selection.count(size) as usize)
        })
        .collect()
}

/// 每种尺寸的汇总：(尺寸, 已装, 总容量, 袋数)，只列出选了的尺寸
pub fn summarize_by_size(bags: &[BagInstance]) -> Vec<(BagSize, u32, u32, u32)> {
    BagSize::ALL
        .iter()
        .filter_map(|&size| {
            let (filled, capacity, count) = bags
                .iter()
                .filter(|b| b.size == size)
                .fold((0, 0, 0), |(f, c, n), b| (f + b.filled, c + b.capacity, n + 1));
            (count > 0).then_some((size, filled, capacity, count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(small: u32, medium: u32, large: u32) -> Result<BagSelection, GameError> {
        let mut selection = BagSelection::default();
        selection.set(BagSize::Small, i64::from(small), 2)?;
        selection.set(BagSize::Medium, i64::from(medium), 2)?;
        selection.set(BagSize::Large, i64::from(large), 2)?;
        Ok(selection)
    }

    #[test]
    fn summary_sums_bags_of_the_same_size() {
        let bags = [
            BagInstance { size: BagSize::Small, capacity: 10, filled: 10 },
            BagInstance { size: BagSize::Small, capacity: 10, filled: 3 },
            BagInstance { size: BagSize::Large, capacity: 40, filled: 0 },
        ];
        assert_eq!(
            summarize_by_size(&bags),
            vec![(BagSize::Small, 13, 20, 2), (BagSize::Large, 0, 40, 1)]
        );
    }

    #[test]
    fn builder_orders_small_medium_large() {
        let table = BagSizeTable::standard();
        let selection = selection(1, 1, 0).unwrap();
        let bags = build_bag_inventory(&selection, &table);
        assert_eq!(
            bags,
            vec![
                BagInstance { size: BagSize::Small, capacity: 10, filled: 0 },
                BagInstance { size: BagSize::Medium, capacity: 20, filled: 0 },
            ]
        );
    }

    #[test]
    fn builder_groups_by_size_regardless_of_selection_order() {
        let table = BagSizeTable::standard();
        let mut selection = BagSelection::default();
        selection.set(BagSize::Large, 2, 2).unwrap();
        selection.set(BagSize::Small, 1, 2).unwrap();
        let sizes: Vec<_> = build_bag_inventory(&selection, &table).iter().map(|b| b.size).collect();
        assert_eq!(sizes, vec![BagSize::Small, BagSize::Large, BagSize::Large]);
    }

    #[test]
    fn builder_with_nothing_selected_is_empty() {
        let bags = build_bag_inventory(&BagSelection::default(), &BagSizeTable::standard());
        assert!(bags.is_empty());
    }

    #[test]
    fn selection_rejects_counts_outside_limit() {
        assert!(matches!(selection(3, 0, 0), Err(GameError::InvalidArgument(_))));

        let mut selection = BagSelection::default();
        assert!(selection.set(BagSize::Medium, -1, 2).is_err());
        assert_eq!(selection.adjust(BagSize::Medium, 1, 2).unwrap(), 1);
        assert_eq!(selection.adjust(BagSize::Medium, 1, 2).unwrap(), 2);
        assert!(selection.adjust(BagSize::Medium, 1, 2).is_err());
        assert_eq!(selection.count(BagSize::Medium), 2);
        assert_eq!(selection.total(), 2);
    }

    #[test]
    fn table_rejects_bad_specs() {
        assert!(matches!(
            BagSizeSpec::new(BagSize::Small, "Small", 0, 1.0),
            Err(GameError::Configuration(_))
        ));
        assert!(BagSizeSpec::new(BagSize::Small, "Small", 10, 0.0).is_err());

        let small = BagSizeSpec::new(BagSize::Small, "Small", 10, 1.0).unwrap();
        let large = BagSizeSpec::new(BagSize::Large, "Large", 40, 4.0).unwrap();
        let err = BagSizeTable::new(vec![small.clone(), large]).unwrap_err();
        assert_eq!(err, GameError::config("no entry for medium bags"));
        assert!(BagSizeTable::new(vec![small.clone(), small]).is_err());
    }

    #[test]
    fn parse_size_accepts_short_names() {
        assert_eq!(BagSize::parse("M").unwrap(), BagSize::Medium);
        assert_eq!(BagSize::parse("large").unwrap(), BagSize::Large);
        assert!(BagSize::parse("huge").is_err());
    }
}
