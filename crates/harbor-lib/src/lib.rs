pub mod axis;
pub mod clock;
pub mod config;
pub mod io;
pub mod phase;
pub mod plot;
pub mod signal;

pub use axis::*;
pub use phase::*;
pub use signal::*;

use anyhow::Result;
use std::path::Path;

use config::HarborConfig;

/// Load both flight logs with the schemas from `config`.
pub fn load_raw_series(wx_path: &Path, gps_path: &Path, config: &HarborConfig) -> Result<RawSeries> {
    let wx = io::wx::read_wx_csv(wx_path, &config.wx)?;
    let gps = io::gps::read_gps_tsv(gps_path, &config.gps)?;
    Ok(RawSeries { wx, gps })
}
