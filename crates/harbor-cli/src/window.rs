use anyhow::{anyhow, Result};
use eframe::{egui, egui::ViewportBuilder};
use egui_plot::{Line, Plot, PlotBounds};
use harbor_lib::plot::{Figure, FigureGrid, PlotBackend, Series, Style};

/// Shows a figure grid in a native window and blocks until it is closed.
pub struct WindowBackend {
    title: String,
    size: (u32, u32),
}

impl WindowBackend {
    pub fn new(title: &str, size: (u32, u32)) -> Self {
        Self {
            title: title.into(),
            size,
        }
    }
}

impl PlotBackend for WindowBackend {
    fn draw(&mut self, grid: &FigureGrid) -> Result<()> {
        let native_options = eframe::NativeOptions {
            viewport: ViewportBuilder::default()
                .with_inner_size([self.size.0 as f32, self.size.1 as f32]),
            ..Default::default()
        };
        let app = GridApp { grid: grid.clone() };
        eframe::run_native(
            &self.title,
            native_options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| anyhow!("plot window '{}' failed: {}", self.title, e))
    }
}

struct GridApp {
    grid: FigureGrid,
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let rows = self.grid.rows.max(1);
            let cols = self.grid.cols.max(1);
            let row_height = ui.available_height() / rows as f32;
            for row in 0..rows {
                ui.columns(cols, |columns| {
                    for (col, col_ui) in columns.iter_mut().enumerate() {
                        let idx = row * cols + col;
                        if let Some(fig) = self.grid.panels.get(idx) {
                            show_panel(col_ui, idx, fig, row_height);
                        }
                    }
                });
            }
        });
    }
}

fn show_panel(ui: &mut egui::Ui, idx: usize, fig: &Figure, height: f32) {
    let mut plot_height = height - 8.0;
    if let Some(title) = &fig.title {
        ui.label(egui::RichText::new(title).strong());
        plot_height -= 20.0;
    }
    let mut plot = Plot::new(("harbor_panel", idx)).height(plot_height.max(60.0));
    if let Some(label) = &fig.x.label {
        plot = plot.x_axis_label(label.clone());
    }
    if let Some(label) = &fig.y.label {
        plot = plot.y_axis_label(label.clone());
    }
    plot.show(ui, |plot_ui| {
        if fig.x_range.is_some() {
            let (x_min, x_max, y_min, y_max) = fig.bounds();
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
        }
        for series in &fig.series {
            match series {
                Series::Line(line) => {
                    plot_ui.line(
                        Line::new(line.points.clone())
                            .stroke(stroke_from_style(&line.style))
                            .name(line.name.clone()),
                    );
                }
            }
        }
    });
}

fn stroke_from_style(style: &Style) -> egui::Stroke {
    let (r, g, b) = style.color.rgb();
    egui::Stroke::new(style.width, egui::Color32::from_rgb(r, g, b))
}
