use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::layout::LayoutConfig;

/// Application settings. Every field has a default, so an empty TOML file
/// (or none at all) is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub assets: AssetConfig,
    pub pdf: PdfConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub pdf_filename: String,
    pub html_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("./output"),
            pdf_filename: "MiningHub-Investment-Plan.pdf".to_string(),
            html_filename: "index.html".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn pdf_path(&self) -> PathBuf {
        self.dir.join(&self.pdf_filename)
    }

    pub fn html_path(&self) -> PathBuf {
        self.dir.join(&self.html_filename)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub crypto_mining_image: PathBuf,
    pub blockchain_dev_image: PathBuf,
    /// TrueType font for non-Latin text. Builtin Helvetica when absent.
    pub font: Option<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            crypto_mining_image: PathBuf::from(
                "assets/generated/mininghub-crypto-mining-hero.dim_1400x800.png",
            ),
            blockchain_dev_image: PathBuf::from(
                "assets/generated/mininghub-blockchain-dev-hero.dim_1400x800.png",
            ),
            font: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub compress: bool,
    pub title: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            compress: true,
            title: "MiningHub Investment Plan".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PlanError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        let page = &layout.page;
        positive("layout.page.width", page.width)?;
        positive("layout.page.height", page.height)?;
        if !(page.margin >= 0.0) || 2.0 * page.margin >= page.width.min(page.height) {
            return Err(PlanError::config(format!(
                "layout.page.margin {} leaves no room for content",
                page.margin
            )));
        }
        positive("layout.level_grid.box_width", layout.level_grid.box_width)?;
        positive("layout.level_grid.box_height", layout.level_grid.box_height)?;
        positive("layout.image.height", layout.image.height)?;
        positive("layout.bullet_advance", layout.bullet_advance)?;
        positive("layout.team_row_advance", layout.team_row_advance)?;
        positive("layout.team_row_height", layout.team_row_height)?;
        let room = page.height - 2.0 * page.margin;
        fits_page("layout.image.height", layout.image.height, room)?;
        fits_page("layout.level_grid.box_height", layout.level_grid.box_height, room)?;
        fits_page("layout.team_row_height", layout.team_row_height, room)?;
        if layout.level_grid.spacing < 0.0 {
            return Err(PlanError::config("layout.level_grid.spacing must not be negative"));
        }
        if self.output.pdf_filename.trim().is_empty() {
            return Err(PlanError::config("output.pdf_filename cannot be empty"));
        }
        if self.output.html_filename.trim().is_empty() {
            return Err(PlanError::config("output.html_filename cannot be empty"));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PlanError::config(format!(
            "{} must be a positive number, got {}",
            field, value
        )))
    }
}

/// A drawn block taller than the content area would cross the bottom margin
/// even at the top of a fresh page.
fn fits_page(field: &str, value: f64, room: f64) -> Result<()> {
    if value <= room {
        Ok(())
    } else {
        Err(PlanError::config(format!(
            "{} {} does not fit the {} mm content height",
            field, value, room
        )))
    }
}
