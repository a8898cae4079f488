use bevy::asset::{AssetLoader, LoadContext, io::Reader, ron};
use thiserror::Error;

use super::schema::Catalog;

#[derive(Default)]
pub struct RonCatalogLoader;

#[derive(Debug, Error)]
pub enum RonCatalogLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl AssetLoader for RonCatalogLoader {
    type Asset = Catalog;
    type Settings = ();
    type Error = RonCatalogLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let s = std::str::from_utf8(&bytes)?;
        let catalog: Catalog = ron::de::from_str(s)?;

        Ok(catalog)
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
