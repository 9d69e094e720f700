mod png;
mod window;

use anyhow::{Context, Result};
use clap::Parser;
use harbor_lib::{
    axis::{correlate, DerivedSeries, FlightRecord},
    config::HarborConfig,
    load_raw_series,
    phase::Peak,
    plot::{phase_grid, timeline_grid, PlotBackend},
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use png::PngBackend;
use window::WindowBackend;

#[derive(Parser)]
#[command(
    name = "harbor",
    version,
    about = "Correlate balloon cabin temperature with GPS altitude and plot ascent/descent"
)]
struct Cli {
    /// Temperature log (CSV with Time and Ch1:Deg F columns)
    wx_file: PathBuf,
    /// GPS track export (tab separated, two banner rows)
    gps_file: PathBuf,
    /// TOML file overriding input schemas and render settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write PNG figures into this directory instead of opening plot windows
    #[arg(long, conflicts_with = "no_plot")]
    out_dir: Option<PathBuf>,
    /// Print peak and derived series as JSON on stdout
    #[arg(long)]
    json: bool,
    /// Skip rendering figures
    #[arg(long)]
    no_plot: bool,
}

#[derive(Debug, PartialEq)]
enum RenderTarget {
    Window,
    Png(PathBuf),
    Skip,
}

impl Cli {
    fn render_target(&self) -> RenderTarget {
        match (&self.out_dir, self.no_plot) {
            (_, true) => RenderTarget::Skip,
            (Some(dir), false) => RenderTarget::Png(dir.clone()),
            (None, false) => RenderTarget::Window,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    peak: Peak,
    dropped: usize,
    derived: &'a DerivedSeries,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => HarborConfig::load(path)?,
        None => HarborConfig::default(),
    };

    let raw = load_raw_series(&cli.wx_file, &cli.gps_file, &config)?;
    let record = correlate(&raw);
    let timeline = timeline_grid(&raw, &config.render);
    let phases = phase_grid(&record.derived, &config.render);
    let size = (config.render.width, config.render.height);

    match cli.render_target() {
        RenderTarget::Window => {
            WindowBackend::new("Harbor Flight Data", size).draw(&timeline)?;
            WindowBackend::new("Harbor Ascent/Descent", size).draw(&phases)?;
        }
        RenderTarget::Png(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            let timeline_path = dir.join("harbor_timeline.png");
            PngBackend::new(&timeline_path, size).draw(&timeline)?;
            let phases_path = dir.join("harbor_phases.png");
            PngBackend::new(&phases_path, size).draw(&phases)?;
            info!(
                "wrote {} and {}",
                timeline_path.display(),
                phases_path.display()
            );
        }
        RenderTarget::Skip => {}
    }

    if cli.json {
        print_report(&record)?;
    }
    Ok(())
}

fn print_report(record: &FlightRecord) -> Result<()> {
    let report = Report {
        peak: record.split.peak,
        dropped: record.split.dropped,
        derived: &record.derived,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("harbor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn plots_open_in_windows_by_default() {
        let cli = parse(&["wx.csv", "gps.txt"]);
        assert_eq!(cli.render_target(), RenderTarget::Window);
    }

    #[test]
    fn png_output_only_with_out_dir() {
        let cli = parse(&["wx.csv", "gps.txt", "--out-dir", "figs"]);
        assert_eq!(cli.render_target(), RenderTarget::Png(PathBuf::from("figs")));
        let cli = parse(&["wx.csv", "gps.txt", "--no-plot"]);
        assert_eq!(cli.render_target(), RenderTarget::Skip);
    }

    #[test]
    fn out_dir_conflicts_with_no_plot() {
        let result = Cli::try_parse_from(["harbor", "a", "b", "--out-dir", "x", "--no-plot"]);
        assert!(result.is_err());
    }
}
