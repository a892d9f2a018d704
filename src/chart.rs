use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::analysis::ExperimentAnalysis;

// ---------------------------------------------------------------------------
// Chart rendering (headless, PNG)
// ---------------------------------------------------------------------------

/// Output raster geometry: a 10 × 6 inch figure at 300 dpi.
const DPI: u32 = 300;
const WIDTH_PX: u32 = 10 * DPI;
const HEIGHT_PX: u32 = 6 * DPI;

/// Where the chart for this analysis is written.
pub fn chart_path(analysis: &ExperimentAnalysis, out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}.png", analysis.file_stem))
}

/// Data ranges for the plot: x spans the concentration levels with half a
/// level of padding, y spans zero to the tallest error bar plus headroom.
fn axis_ranges(analysis: &ExperimentAnalysis) -> ((f64, f64), (f64, f64)) {
    let first = analysis.summaries.first();
    let last = analysis.summaries.last();
    let x_min = first.map_or(0.0, |s| s.concentration as f64) - 0.5;
    let x_max = last.map_or(0.0, |s| s.concentration as f64) + 0.5;

    let y_top = analysis
        .summaries
        .iter()
        .map(|s| s.mean_volume + s.std_dev)
        .fold(0.0_f64, f64::max);
    ((x_min, x_max), (0.0, y_top * 1.15))
}

/// Render the error-bar scatter with trendline overlay and save it as
/// `<stem>.png` in `out_dir`, overwriting silently.
pub fn render_chart(analysis: &ExperimentAnalysis, out_dir: &Path) -> Result<PathBuf> {
    let path = chart_path(analysis, out_dir);
    let ((x_min, x_max), (y_min, y_max)) = axis_ranges(analysis);
    let title = format!(
        "Effect of NaCl Concentration on Yeast Fermentation ({})",
        analysis.time_label
    );

    let root = BitMapBackend::new(&path, (WIDTH_PX, HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("clearing {}", path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 64))
        .margin(40)
        .x_label_area_size(130)
        .y_label_area_size(150)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .context("building chart axes")?;

    chart
        .configure_mesh()
        .x_desc("NaCl Concentration (%, w/v)")
        .y_desc("Volume of CO2 Produced (cm³)")
        .axis_desc_style(("sans-serif", 46))
        .label_style(("sans-serif", 38))
        .x_labels(analysis.summaries.len())
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .draw()
        .context("drawing chart mesh")?;

    // ±1 sample standard deviation around each group mean.
    chart
        .draw_series(analysis.summaries.iter().map(|s| {
            let x = s.concentration as f64;
            ErrorBar::new_vertical(
                x,
                s.mean_volume - s.std_dev,
                s.mean_volume,
                s.mean_volume + s.std_dev,
                RED.stroke_width(4),
                14,
            )
        }))
        .context("drawing error bars")?;

    chart
        .draw_series(
            analysis
                .summaries
                .iter()
                .map(|s| Circle::new((s.concentration as f64, s.mean_volume), 10, BLUE.filled())),
        )
        .context("drawing group means")?
        .label("Mean CO2 Volume")
        .legend(|(x, y)| Circle::new((x + 12, y), 8, BLUE.filled()));

    let trend: Vec<(f64, f64)> = analysis
        .summaries
        .iter()
        .map(|s| {
            let x = s.concentration as f64;
            (x, analysis.fit.value_at(x))
        })
        .collect();
    chart
        .draw_series(DashedLineSeries::new(trend, 16, 12, GREEN.stroke_width(5)))
        .context("drawing trendline")?
        .label(format!("Trendline (R²={:.4})", analysis.fit.r_squared))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], GREEN.stroke_width(5)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 40))
        .draw()
        .context("drawing legend")?;

    root.present()
        .with_context(|| format!("writing chart to {}", path.display()))?;
    drop(chart);
    drop(root);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::data::experiments;

    #[test]
    fn chart_path_uses_file_stem() {
        let analysis = analysis::analyze(&experiments::five_minute()).unwrap();
        let path = chart_path(&analysis, Path::new("out"));
        assert_eq!(path, Path::new("out/yeast_fermentation_5min.png"));
    }

    #[test]
    fn axis_ranges_cover_all_error_bars() {
        let analysis = analysis::analyze(&experiments::ten_minute()).unwrap();
        let ((x_min, x_max), (y_min, y_max)) = axis_ranges(&analysis);
        assert_eq!(x_min, -0.5);
        assert_eq!(x_max, 4.5);
        assert_eq!(y_min, 0.0);
        for s in &analysis.summaries {
            assert!(s.mean_volume + s.std_dev < y_max);
        }
    }

    // Exercises the whole rendering path; needs a system sans-serif font,
    // which headless CI boxes do not always have.
    #[test]
    #[ignore = "requires a system font for text rendering"]
    fn renders_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = analysis::analyze(&experiments::five_minute()).unwrap();
        let path = render_chart(&analysis, dir.path()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']));
        assert!(bytes.len() > 1024);
    }
}
