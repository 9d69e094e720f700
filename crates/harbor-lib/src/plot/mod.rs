use serde::{Deserialize, Serialize};

use crate::axis::DerivedSeries;
use crate::config::RenderConfig;
use crate::signal::RawSeries;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

impl Axis {
    fn labeled(label: &str) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    /// Fixed x limits; computed from the data when `None`
    pub x_range: Option<[f64; 2]>,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            x_range: None,
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Data bounds as `(x_min, x_max, y_min, y_max)`, honoring `x_range`.
    ///
    /// Degenerate spans are widened so a backend can always build a chart.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let points = self.series.iter().flat_map(|series| match series {
            Series::Line(line) => line.points.iter(),
        });
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points.filter(|p| p[0].is_finite() && p[1].is_finite()) {
            x = (x.0.min(p[0]), x.1.max(p[0]));
            y = (y.0.min(p[1]), y.1.max(p[1]));
        }
        if let Some([lo, hi]) = self.x_range {
            x = (lo, hi);
        }
        let (x_min, x_max) = widen(x);
        let (y_min, y_max) = widen(y);
        (x_min, x_max, y_min, y_max)
    }
}

/// Panels laid out row-major on one canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureGrid {
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<Figure>,
}

pub trait PlotBackend {
    fn draw(&mut self, grid: &FigureGrid) -> anyhow::Result<()>;
}

pub fn decimate_points(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let bucket_size = points.len() as f64 / max_points as f64;
    let mut result = Vec::with_capacity(max_points);
    for i in 0..max_points {
        let start = (i as f64 * bucket_size).floor() as usize;
        if start >= points.len() {
            break;
        }
        result.push(points[start]);
    }
    result
}

const TEMPERATURE_COLOR: Color = Color(0xD62728);
const ALTITUDE_COLOR: Color = Color(0x1F77B4);

fn line(name: &str, points: &[[f64; 2]], max_points: usize, color: Color) -> Series {
    Series::Line(LineSeries {
        name: name.into(),
        points: decimate_points(points, max_points),
        style: Style {
            width: 1.4,
            color,
        },
    })
}

/// Temperature and altitude against mission elapsed time, stacked vertically.
pub fn timeline_grid(raw: &RawSeries, render: &RenderConfig) -> FigureGrid {
    let mut temperature = Figure::new(Some("Harbor Flight Data".into()));
    temperature.y = Axis::labeled("Temperature, F");
    temperature.x_range = render.time_range_h;
    temperature.add_series(line(
        "temperature",
        &raw.wx.points(),
        render.max_points,
        TEMPERATURE_COLOR,
    ));

    let mut altitude = Figure::new(None);
    altitude.x = Axis::labeled("Mission Elapsed Time, Hours");
    altitude.y = Axis::labeled("Altitude, Feet");
    altitude.add_series(line(
        "altitude",
        &raw.gps.points(),
        render.max_points,
        ALTITUDE_COLOR,
    ));

    FigureGrid {
        rows: 2,
        cols: 1,
        panels: vec![temperature, altitude],
    }
}

/// Synthesized altitude against temperature for ascent and descent, side by side.
pub fn phase_grid(derived: &DerivedSeries, render: &RenderConfig) -> FigureGrid {
    let mut ascent = Figure::new(Some("Harbor Ascent Flight Data".into()));
    ascent.x = Axis::labeled("Temperature, F");
    ascent.y = Axis::labeled("Altitude, Feet");
    ascent.add_series(line(
        "ascent",
        &derived.ascent_points(),
        render.max_points,
        ALTITUDE_COLOR,
    ));

    let mut descent = Figure::new(Some("Harbor Descent Flight Data".into()));
    descent.x = Axis::labeled("Temperature, F");
    descent.add_series(line(
        "descent",
        &derived.descent_points(),
        render.max_points,
        TEMPERATURE_COLOR,
    ));

    FigureGrid {
        rows: 1,
        cols: 2,
        panels: vec![ascent, descent],
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::TimeSeries;

    fn first_line(fig: &Figure) -> &LineSeries {
        match &fig.series[0] {
            Series::Line(line) => line,
        }
    }

    #[test]
    fn decimation_caps_point_count() {
        let points: Vec<[f64; 2]> = (0..100).map(|i| [i as f64, 0.0]).collect();
        let out = decimate_points(&points, 10);
        assert_eq!(out.len(), 10);
        assert_eq!(out[0], [0.0, 0.0]);
        assert_eq!(out[1], [10.0, 0.0]);
        assert_eq!(decimate_points(&points[..5], 10).len(), 5);
    }

    #[test]
    fn timeline_has_two_stacked_panels() {
        let raw = RawSeries {
            wx: TimeSeries::from_parts(&[0.0, 1.0, 3.0], &[70.0, 10.0, 60.0]).unwrap(),
            gps: TimeSeries::from_parts(&[0.0, 1.0], &[800.0, 9000.0]).unwrap(),
        };
        let grid = timeline_grid(&raw, &RenderConfig::default());
        assert_eq!((grid.rows, grid.cols), (2, 1));
        let temp = &grid.panels[0];
        assert_eq!(temp.title.as_deref(), Some("Harbor Flight Data"));
        assert_eq!(temp.bounds(), (0.0, 2.35, 10.0, 70.0));
        assert_eq!(first_line(temp).points.len(), 3);
        let alt = &grid.panels[1];
        assert_eq!(alt.x.label.as_deref(), Some("Mission Elapsed Time, Hours"));
        assert_eq!(alt.bounds(), (0.0, 1.0, 800.0, 9000.0));
    }

    #[test]
    fn phase_grid_plots_altitude_against_temperature() {
        let derived = DerivedSeries {
            temp_up: vec![70.0, 20.0],
            alt_up: vec![800.0, 50000.0],
            temp_down: vec![10.0],
            alt_down: vec![50000.0],
        };
        let grid = phase_grid(&derived, &RenderConfig::default());
        assert_eq!((grid.rows, grid.cols), (1, 2));
        assert_eq!(
            first_line(&grid.panels[0]).points,
            vec![[70.0, 800.0], [20.0, 50000.0]]
        );
        assert_eq!(
            grid.panels[1].title.as_deref(),
            Some("Harbor Descent Flight Data")
        );
        let (x_min, x_max, y_min, y_max) = grid.panels[1].bounds();
        assert!(x_min < 10.0 && x_max > 10.0);
        assert!(y_min < 50000.0 && y_max > 50000.0);
    }

    #[test]
    fn line_styles_are_solid_width_and_color() {
        let grid = phase_grid(&DerivedSeries::default(), &RenderConfig::default());
        let ascent = first_line(&grid.panels[0]);
        let descent = first_line(&grid.panels[1]);
        assert_eq!(ascent.style.color, ALTITUDE_COLOR);
        assert_eq!(descent.style.color, TEMPERATURE_COLOR);
        assert_eq!(ascent.style.width, 1.4);
        let json = serde_json::to_value(&ascent.style).unwrap();
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn empty_figure_has_unit_bounds() {
        let fig = Figure::new(None);
        assert_eq!(fig.bounds(), (0.0, 1.0, 0.0, 1.0));
        assert_eq!(Color(0x1F77B4).rgb(), (0x1F, 0x77, 0xB4));
    }
}
