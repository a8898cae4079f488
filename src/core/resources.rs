use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;

use super::error::GameError;

pub const CONFIG_PATH: &str = "assets/config/game.toml";

/// 全局玩法参数（来自 assets/config/game.toml，缺省值即原版数值）
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// 每磅单价（美元）
    pub price_per_lb: f32,
    /// 每丛灌木的浆果数区间（闭区间）
    pub yield_min: u32,
    pub yield_max: u32,
    /// 每种尺寸最多可选的袋子数
    pub max_bags_per_size: u32,
    pub field_columns: u32,
    pub bushes_per_column: u32,
    pub bake_seconds: f32,
    pub pie_bites: u32,
    pub default_player_name: String,
    /// 固定种子，便于复现同一片田
    pub seed: Option<u64>,
    /// 相对 assets/ 的目录文件路径
    pub catalog_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            price_per_lb: 5.0,
            yield_min: 5,
            yield_max: 10,
            max_bags_per_size: 2,
            field_columns: 7,
            bushes_per_column: 10,
            bake_seconds: 3.0,
            pie_bites: 5,
            default_player_name: "Berry Muncher".to_string(),
            seed: None,
            catalog_path: "data/catalog.ron".to_string(),
        }
    }
}

impl GameConfig {
    /// 解析 TOML 文本并校验
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: GameConfig = toml::from_str(text).context("could not parse game config")?;
        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件；文件不存在时退回默认值
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("未找到配置文件 {}，使用默认配置", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !self.price_per_lb.is_finite() || self.price_per_lb <= 0.0 {
            return Err(GameError::config(format!(
                "price_per_lb must be positive, got {}",
                self.price_per_lb
            )));
        }
        if self.yield_min > self.yield_max {
            return Err(GameError::config(format!(
                "yield range {}..={} is empty",
                self.yield_min, self.yield_max
            )));
        }
        if self.max_bags_per_size == 0 {
            return Err(GameError::config("max_bags_per_size must be at least 1"));
        }
        if self.field_columns == 0 || self.bushes_per_column == 0 {
            return Err(GameError::config("field must contain at least one bush"));
        }
        if self.field_columns.checked_mul(self.bushes_per_column).is_none() {
            return Err(GameError::config(format!(
                "field of {}x{} bushes is too large",
                self.field_columns, self.bushes_per_column
            )));
        }
        if self.pie_bites == 0 {
            return Err(GameError::config("pie_bites must be at least 1"));
        }
        if !self.bake_seconds.is_finite() || self.bake_seconds < 0.0 {
            return Err(GameError::config("bake_seconds must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.price_per_lb, 5.0);
        assert_eq!((config.yield_min, config.yield_max), (5, 10));
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = GameConfig::from_toml("price_per_lb = 4.5\nseed = 42\n").unwrap();
        assert_eq!(config.price_per_lb, 4.5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_bags_per_size, 2);
    }

    #[test]
    fn rejects_non_positive_rate() {
        let err = GameConfig::from_toml("price_per_lb = 0.0").unwrap_err();
        let root = err.downcast_ref::<GameError>().unwrap();
        assert!(matches!(root, GameError::Configuration(_)));
    }

    #[test]
    fn rejects_field_too_large_to_count() {
        let config = GameConfig {
            field_columns: u32::MAX,
            bushes_per_column: 2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GameError::Configuration(_))));

        let err = GameConfig::from_toml("field_columns = 65536\nbushes_per_column = 65536").unwrap_err();
        assert!(matches!(err.downcast_ref::<GameError>(), Some(GameError::Configuration(_))));
    }

    #[test]
    fn rejects_inverted_yield_range() {
        let config = GameConfig {
            yield_min: 10,
            yield_max: 5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GameError::Configuration(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(GameConfig::from_toml("price_per_lb = \"cheap\"").is_err());
    }
}
