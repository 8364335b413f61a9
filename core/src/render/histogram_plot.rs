use crate::volume::Histogram;
use std::fmt;

pub const HISTOGRAM_TITLE: &str = "Histogram of Hounsfield Units (HU)";
pub const X_AXIS_LABEL: &str = "HU";
pub const Y_AXIS_LABEL: &str = "Voxel Count";

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

/// Renders a histogram as a standalone SVG bar chart
///
/// Gray bars over the full binning range, with gridlines at every tick,
/// tick labels, a title, and both axis labels.
pub fn render_histogram_svg(histogram: &Histogram) -> String {
    HistogramPlot::new(histogram).to_string()
}

/// SVG formatter for a histogram
pub struct HistogramPlot<'a> {
    histogram: &'a Histogram,
}

impl<'a> HistogramPlot<'a> {
    /// Creates a new plot
    pub fn new(histogram: &'a Histogram) -> Self {
        Self { histogram }
    }
}

impl<'a> fmt::Display for HistogramPlot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let histogram = self.histogram;
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let x0 = MARGIN_LEFT;
        let y0 = MARGIN_TOP + plot_h;

        let config = histogram.config;
        let span = config.max - config.min;
        let y_max = nice_ceiling(histogram.counts.iter().copied().max().unwrap_or(0));

        let x_of = |hu: f64| x0 + (hu - config.min) / span * plot_w;
        let y_of = |count: f64| y0 - count / y_max as f64 * plot_h;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
        )?;
        writeln!(
            f,
            r#"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
        )?;

        // Gridlines and tick labels
        writeln!(f, r##"<g stroke="#d0d0d0" stroke-width="1">"##)?;
        for i in 0..=X_TICKS {
            let x = x0 + plot_w * i as f64 / X_TICKS as f64;
            writeln!(
                f,
                r#"<line x1="{x:.2}" y1="{MARGIN_TOP}" x2="{x:.2}" y2="{y0}"/>"#
            )?;
        }
        for i in 0..=Y_TICKS {
            let y = y0 - plot_h * i as f64 / Y_TICKS as f64;
            writeln!(
                f,
                r#"<line x1="{x0}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
                x0 + plot_w
            )?;
        }
        writeln!(f, "</g>")?;

        writeln!(f, r##"<g fill="#333333" font-size="12">"##)?;
        for i in 0..=X_TICKS {
            let hu = config.min + span * i as f64 / X_TICKS as f64;
            writeln!(
                f,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                x_of(hu),
                y0 + 18.0,
                format_tick(hu)
            )?;
        }
        for i in 0..=Y_TICKS {
            let count = y_max as f64 * i as f64 / Y_TICKS as f64;
            writeln!(
                f,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
                x0 - 8.0,
                y_of(count) + 4.0,
                format_tick(count)
            )?;
        }
        writeln!(f, "</g>")?;

        // Bars
        writeln!(f, r##"<g fill="#808080">"##)?;
        let width = plot_w / config.bins as f64;
        for (i, &count) in histogram.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let top = y_of(count as f64);
            writeln!(
                f,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
                x0 + width * i as f64,
                top,
                width,
                y0 - top
            )?;
        }
        writeln!(f, "</g>")?;

        // Axes and labels
        writeln!(
            f,
            r##"<rect x="{x0}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}" fill="none" stroke="#000000"/>"##
        )?;
        writeln!(
            f,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="18">{}</text>"#,
            WIDTH / 2.0,
            MARGIN_TOP - 18.0,
            HISTOGRAM_TITLE
        )?;
        writeln!(
            f,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="14">{}</text>"#,
            x0 + plot_w / 2.0,
            HEIGHT - 20.0,
            X_AXIS_LABEL
        )?;
        writeln!(
            f,
            r#"<text x="20" y="{:.2}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {:.2})">{}</text>"#,
            MARGIN_TOP + plot_h / 2.0,
            MARGIN_TOP + plot_h / 2.0,
            Y_AXIS_LABEL
        )?;
        writeln!(f, "</svg>")
    }
}

/// Rounds a bin count up to a value that divides evenly into the y ticks
fn nice_ceiling(max_count: u64) -> u64 {
    if max_count == 0 {
        return Y_TICKS as u64;
    }
    let raw = (max_count as f64 / Y_TICKS as f64).ceil();
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);
    step as u64 * Y_TICKS as u64
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
