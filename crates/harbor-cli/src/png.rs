use anyhow::{Context, Result};
use harbor_lib::plot::{Figure, FigureGrid, PlotBackend, Series};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Draws a figure grid into a PNG file via plotters.
pub struct PngBackend<'a> {
    path: &'a Path,
    size: (u32, u32),
}

impl<'a> PngBackend<'a> {
    pub fn new(path: &'a Path, size: (u32, u32)) -> Self {
        Self { path, size }
    }
}

impl PlotBackend for PngBackend<'_> {
    fn draw(&mut self, grid: &FigureGrid) -> Result<()> {
        let root = BitMapBackend::new(self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let areas = root.split_evenly((grid.rows, grid.cols));
        for (area, fig) in areas.iter().zip(&grid.panels) {
            draw_panel(area, fig)?;
        }
        root.present()
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, fig: &Figure) -> Result<()> {
    let (x_min, x_max, y_min, y_max) = fig.bounds();
    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(35).y_label_area_size(60);
    if let Some(title) = &fig.title {
        builder.caption(title, ("sans-serif", 22));
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    let mut mesh = chart.configure_mesh();
    if let Some(label) = &fig.x.label {
        mesh.x_desc(label);
    }
    if let Some(label) = &fig.y.label {
        mesh.y_desc(label);
    }
    mesh.draw()?;
    for series in &fig.series {
        match series {
            Series::Line(line) => {
                let (r, g, b) = line.style.color.rgb();
                let stroke = RGBColor(r, g, b).stroke_width(line.style.width.ceil() as u32);
                chart.draw_series(LineSeries::new(
                    line.points.iter().map(|p| (p[0], p[1])),
                    stroke,
                ))?;
            }
        }
    }
    Ok(())
}
