use std::path::Path;

use tracing::{debug, warn};

use crate::config::AssetConfig;
use crate::error::{PlanError, Result};
use crate::image::RasterImage;

/// The two decorative images of the plan. Loaded as a pair: either both are
/// available or the document goes without images.
#[derive(Debug, Clone)]
pub struct HeroImages {
    pub crypto_mining: RasterImage,
    pub blockchain_dev: RasterImage,
}

/// Read and decode one image file.
pub async fn load_image(path: &Path) -> Result<RasterImage> {
    let data = tokio::fs::read(path).await.map_err(|e| PlanError::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let image = RasterImage::decode(data, path)?;
    debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "loaded image"
    );
    Ok(image)
}

/// Load both hero images concurrently. The first failure fails the pair.
pub async fn load_hero_images(assets: &AssetConfig) -> Result<HeroImages> {
    let (crypto_mining, blockchain_dev) = tokio::try_join!(
        load_image(&assets.crypto_mining_image),
        load_image(&assets.blockchain_dev_image),
    )?;
    Ok(HeroImages {
        crypto_mining,
        blockchain_dev,
    })
}

/// Like [`load_hero_images`], but a failure is logged and yields `None`.
pub async fn load_hero_images_or_skip(assets: &AssetConfig) -> Option<HeroImages> {
    match load_hero_images(assets).await {
        Ok(images) => Some(images),
        Err(e) => {
            warn!("continuing without images: {}", e);
            None
        }
    }
}
