use bevy::prelude::*;
use serde::Deserialize;

use crate::bags::components::{BagSize, BagSizeSpec, BagSizeTable};
use crate::core::error::GameError;

#[derive(Debug, Clone, Deserialize)]
pub struct BagEntry {
    pub size: BagSize,
    pub label: String,
    pub capacity: u32,
    pub max_weight: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// assets/data/catalog.ron 的内容
#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct Catalog {
    pub bags: Vec<BagEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// 可选的田地
#[derive(Resource, Debug, Clone, Default)]
pub struct FieldCatalog {
    pub fields: Vec<FieldEntry>,
}

impl FieldCatalog {
    /// 按名称（忽略大小写）找一块开放的田
    pub fn find_active(&self, name: &str) -> Result<&FieldEntry, GameError> {
        let entry = self
            .fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::invalid(format!("no field named `{name}`")))?;
        if !entry.active {
            return Err(GameError::invalid(format!("{} Field is not open yet", entry.name)));
        }
        Ok(entry)
    }
}

impl Catalog {
    /// 校验并拆成运行期资源
    pub fn validate(&self) -> Result<(BagSizeTable, FieldCatalog), GameError> {
        let specs = self
            .bags
            .iter()
            .map(|b| BagSizeSpec::new(b.size, b.label.clone(), b.capacity, b.max_weight))
            .collect::<Result<Vec<_>, _>>()?;
        let table = BagSizeTable::new(specs)?;
        if !self.fields.iter().any(|f| f.active) {
            return Err(GameError::config("catalog has no active field"));
        }
        Ok((
            table,
            FieldCatalog {
                fields: self.fields.clone(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::ron;

    const CATALOG: &str = r#"(
        bags: [
            (size: Large,  label: "Large (4lb)",  capacity: 40, max_weight: 4.0),
            (size: Small,  label: "Small (1lb)",  capacity: 10, max_weight: 1.0),
            (size: Medium, label: "Medium (2lb)", capacity: 20, max_weight: 2.0),
        ],
        fields: [
            (name: "Blueberry", active: true),
            (name: "Apple"),
        ],
    )"#;

    #[test]
    fn shipped_catalog_shape_validates() {
        let catalog: Catalog = ron::de::from_str(CATALOG).unwrap();
        let (table, fields) = catalog.validate().unwrap();
        assert_eq!(table, BagSizeTable::standard());
        assert_eq!(fields.find_active("blueberry").unwrap().name, "Blueberry");
        assert!(fields.find_active("Apple").is_err());
        assert!(fields.find_active("Durian").is_err());
    }

    #[test]
    fn zero_capacity_is_a_configuration_error() {
        let text = CATALOG.replace("capacity: 10", "capacity: 0");
        let catalog: Catalog = ron::de::from_str(&text).unwrap();
        assert!(matches!(catalog.validate(), Err(GameError::Configuration(_))));
    }

    #[test]
    fn catalog_needs_an_open_field() {
        let text = CATALOG.replace("active: true", "active: false");
        let catalog: Catalog = ron::de::from_str(&text).unwrap();
        assert!(catalog.validate().is_err());
    }
}
