use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column layout of the cabin temperature CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WxSchema {
    pub time_column: String,
    pub value_column: String,
    pub delimiter: char,
}

impl Default for WxSchema {
    fn default() -> Self {
        Self {
            time_column: "Time".into(),
            value_column: "Ch1:Deg F".into(),
            delimiter: ',',
        }
    }
}

/// Fixed column positions of the GPS track export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsSchema {
    /// Banner rows preceding the data
    pub skip_rows: usize,
    pub hour: usize,
    pub minute: usize,
    pub second: usize,
    pub altitude: usize,
    pub delimiter: char,
}

impl Default for GpsSchema {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            hour: 0,
            minute: 1,
            second: 2,
            altitude: 6,
            delimiter: '\t',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Visible time window of the temperature panel, in hours
    pub time_range_h: Option<[f64; 2]>,
    /// Upper bound on points drawn per line
    pub max_points: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            time_range_h: Some([0.0, 2.35]),
            max_points: 4096,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarborConfig {
    pub wx: WxSchema,
    pub gps: GpsSchema,
    pub render: RenderConfig,
}

impl HarborConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: HarborConfig = toml::from_str(text).context("parsing harbor config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        delimiter_byte(self.wx.delimiter)?;
        delimiter_byte(self.gps.delimiter)?;
        if self.render.width == 0 || self.render.height == 0 {
            bail!(
                "render size must be non-zero, got {}x{}",
                self.render.width,
                self.render.height
            );
        }
        if self.render.max_points == 0 {
            bail!("max_points must be at least 1");
        }
        if let Some([lo, hi]) = self.render.time_range_h {
            if !(lo < hi) {
                bail!("time_range_h must be increasing, got [{}, {}]", lo, hi);
            }
        }
        Ok(())
    }
}

pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter {:?} is not a single ASCII character", delimiter);
    }
    Ok(delimiter as u8)
}
