use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bags::components::BagInstance;
use crate::core::error::GameError;

/// 一次采摘得到的浆果数，构造时拒绝负数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestYield(u32);

impl HarvestYield {
    pub fn new(amount: i64) -> Result<Self, GameError> {
        if amount < 0 {
            return Err(GameError::invalid(format!("harvest yield must be non-negative, got {amount}")));
        }
        u32::try_from(amount)
            .map(Self)
            .map_err(|_| GameError::invalid(format!("harvest yield {amount} is too large")))
    }

    pub fn amount(self) -> u32 {
        self.0
    }
}

impl From<u32> for HarvestYield {
    fn from(amount: u32) -> Self {
        Self(amount)
    }
}

/// 一次分配的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// 实际装进袋子的数量
    pub stored: u32,
    /// 袋子都满了，丢掉的数量
    pub discarded: u32,
    /// (袋子下标, 装入数量)，按装填顺序
    pub fills: Vec<(usize, u32)>,
}

/// 按顺序把产量装进袋子，前一只装满才轮到下一只；装不下的直接丢弃
pub fn allocate(harvest: HarvestYield, bags: &mut [BagInstance]) -> Allocation {
    let mut remaining = harvest.amount();
    let mut allocation = Allocation::default();

    for (index, bag) in bags.iter_mut().enumerate() {
        if remaining == 0 {
            break;
        }
        let added = remaining.min(bag.remaining());
        if added == 0 {
            continue;
        }
        bag.filled += added;
        remaining -= added;
        allocation.stored += added;
        allocation.fills.push((index, added));
    }

    allocation.discarded = remaining;
    allocation
}

/// 每丛灌木的产量来源，可替换以便测试
pub trait YieldSource: Send + Sync {
    /// 在 [min, max] 内取一个数
    fn draw(&mut self, min: u32, max: u32) -> u32;
}

/// 默认来源：均匀随机
pub struct RandomYield(StdRng);

impl RandomYield {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl YieldSource for RandomYield {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.0.gen_range(min..=max)
    }
}

#[derive(Resource)]
pub struct BushYields(pub Box<dyn YieldSource>);

/// 一丛蓝莓
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bush {
    pub column: u32,
    pub position: u32,
    pub berries: u32,
}

impl Bush {
    pub fn has_berries(&self) -> bool {
        self.berries > 0
    }
}

/// 当前这片田，按列优先存放
#[derive(Resource, Debug, Clone, Default)]
pub struct Field {
    pub columns: u32,
    pub per_column: u32,
    pub bushes: Vec<Bush>,
}

impl Field {
    pub fn generate(columns: u32, per_column: u32, min: u32, max: u32, source: &mut dyn YieldSource) -> Self {
        let mut bushes = Vec::with_capacity(columns as usize * per_column as usize);
        for column in 0..columns {
            for position in 0..per_column {
                bushes.push(Bush {
                    column,
                    position,
                    berries: source.draw(min, max),
                });
            }
        }
        Self {
            columns,
            per_column,
            bushes,
        }
    }

    pub fn bush_mut(&mut self, column: u32, position: u32) -> Result<&mut Bush, GameError> {
        if column >= self.columns || position >= self.per_column {
            return Err(GameError::invalid(format!(
                "no bush at ({column}, {position}); field is {}x{}",
                self.columns, self.per_column
            )));
        }
        let index = (column * self.per_column + position) as usize;
        self.bushes
            .get_mut(index)
            .ok_or_else(|| GameError::invalid(format!("no bush at ({column}, {position})")))
    }

    pub fn berries_left(&self) -> u32 {
        self.bushes.iter().map(|b| b.berries).sum()
    }

    pub fn bushes_with_berries(&self) -> usize {
        self.bushes.iter().filter(|b| b.has_berries()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bags::components::BagSize;

    fn bag(size: BagSize, capacity: u32, filled: u32) -> BagInstance {
        BagInstance { size, capacity, filled }
    }

    fn small_and_medium() -> Vec<BagInstance> {
        vec![bag(BagSize::Small, 10, 0), bag(BagSize::Medium, 20, 0)]
    }

    struct Fixed(u32);

    impl YieldSource for Fixed {
        fn draw(&mut self, _min: u32, _max: u32) -> u32 {
            self.0
        }
    }

    #[test]
    fn yield_of_fifteen_spills_into_second_bag() {
        let mut bags = small_and_medium();
        let allocation = allocate(HarvestYield::from(15), &mut bags);
        assert_eq!(bags, vec![bag(BagSize::Small, 10, 10), bag(BagSize::Medium, 20, 5)]);
        assert_eq!(allocation.stored, 15);
        assert_eq!(allocation.discarded, 0);
        assert_eq!(allocation.fills, vec![(0, 10), (1, 5)]);
    }

    #[test]
    fn overflow_is_discarded_without_error() {
        let mut bags = small_and_medium();
        let allocation = allocate(HarvestYield::from(35), &mut bags);
        assert_eq!(bags, vec![bag(BagSize::Small, 10, 10), bag(BagSize::Medium, 20, 20)]);
        assert_eq!(allocation.stored, 30);
        assert_eq!(allocation.discarded, 5);
    }

    #[test]
    fn zero_yield_is_a_no_op() {
        let mut bags = small_and_medium();
        let allocation = allocate(HarvestYield::from(0), &mut bags);
        assert_eq!(bags, small_and_medium());
        assert_eq!(allocation, Allocation::default());
    }

    #[test]
    fn negative_yield_is_rejected() {
        assert!(matches!(HarvestYield::new(-3), Err(GameError::InvalidArgument(_))));
        assert_eq!(HarvestYield::new(7).unwrap().amount(), 7);
    }

    #[test]
    fn full_bags_are_skipped_in_order() {
        let mut bags = vec![
            bag(BagSize::Small, 10, 10),
            bag(BagSize::Small, 10, 4),
            bag(BagSize::Large, 40, 0),
        ];
        let allocation = allocate(HarvestYield::from(8), &mut bags);
        assert_eq!(bags[1].filled, 10);
        assert_eq!(bags[2].filled, 2);
        assert_eq!(allocation.fills, vec![(1, 6), (2, 2)]);
    }

    #[test]
    fn stored_amount_is_min_of_yield_and_room_for_many_yields() {
        for amount in 0..=80u32 {
            let mut bags = vec![
                bag(BagSize::Small, 10, 3),
                bag(BagSize::Medium, 20, 0),
                bag(BagSize::Large, 40, 39),
            ];
            let room: u32 = bags.iter().map(|b| b.remaining()).sum();
            let before: Vec<_> = bags.clone();
            let allocation = allocate(HarvestYield::from(amount), &mut bags);

            let gained: u32 = bags.iter().zip(&before).map(|(a, b)| a.filled - b.filled).sum();
            assert_eq!(gained, amount.min(room));
            assert_eq!(allocation.stored + allocation.discarded, amount);
            assert!(bags.iter().all(|b| b.filled <= b.capacity));

            // 后面的袋子有增长时，前面的袋子必须已满
            for (i, (after, prior)) in bags.iter().zip(&before).enumerate() {
                if after.filled > prior.filled {
                    assert!(bags[..i].iter().all(|earlier| earlier.remaining() == 0));
                }
            }
        }
    }

    #[test]
    fn field_generation_uses_the_yield_source() {
        let field = Field::generate(2, 3, 5, 10, &mut Fixed(7));
        assert_eq!(field.bushes.len(), 6);
        assert_eq!(field.berries_left(), 42);
        assert_eq!(field.bushes[4], Bush { column: 1, position: 1, berries: 7 });
    }

    #[test]
    fn random_yields_stay_in_range() {
        let mut source = RandomYield::new(Some(9));
        for _ in 0..200 {
            let n = source.draw(5, 10);
            assert!((5..=10).contains(&n));
        }
    }

    #[test]
    fn bush_lookup_rejects_out_of_range() {
        let mut field = Field::generate(7, 10, 5, 10, &mut Fixed(5));
        assert!(field.bush_mut(6, 9).is_ok());
        assert!(matches!(field.bush_mut(7, 0), Err(GameError::InvalidArgument(_))));
        assert!(field.bush_mut(0, 10).is_err());
    }
}
