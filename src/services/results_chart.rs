use plotters::prelude::*;
use thiserror::Error;

use crate::domain::results::{Recommendation, SimulationResults};

const SERVE_FIRST_COLOR: RGBColor = RGBColor(34, 197, 94);
const CHOOSE_SIDE_COLOR: RGBColor = RGBColor(59, 130, 246);
const MUTED_COLOR: RGBColor = RGBColor(148, 163, 184);

#[derive(Error, Debug)]
pub enum ResultsChartError {
    #[error("failed to render results chart: {0}")]
    Render(String),
}

/// Bar chart comparing both strategies' win rates, recommended one highlighted.
pub fn write_results_chart_png(
    output_path: &str,
    results: &SimulationResults,
) -> Result<(), ResultsChartError> {
    let serve_first = results.serve_first_win_rate * 100.0;
    let choose_side = results.choose_side_win_rate * 100.0;
    let (y_min, y_max) = percent_axis_range(serve_first, choose_side);

    let (serve_first_color, choose_side_color) = match results.recommendation {
        Recommendation::ServeFirst => (SERVE_FIRST_COLOR, MUTED_COLOR),
        Recommendation::ChooseSide => (MUTED_COLOR, CHOOSE_SIDE_COLOR),
    };

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ResultsChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Win Probability Comparison", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0.0..4.0, y_min..y_max)
        .map_err(|e| ResultsChartError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(5)
        .x_desc("Strategy")
        .y_desc("Win Probability (%)")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| bar_label(*value).to_string())
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| ResultsChartError::Render(e.to_string()))?;

    let bars = [
        (1.0, serve_first, serve_first_color),
        (3.0, choose_side, choose_side_color),
    ];
    chart
        .draw_series(bars.iter().map(|(center, value, color)| {
            Rectangle::new(
                [(*center - 0.5, y_min), (*center + 0.5, *value)],
                color.filled(),
            )
        }))
        .map_err(|e| ResultsChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ResultsChartError::Render(e.to_string()))?;
    Ok(())
}

/// Y axis in percent: five points of headroom either side of the bars,
/// rounded outward and kept inside `[0, 100]`.
fn percent_axis_range(first: f64, second: f64) -> (f64, f64) {
    let low = (first.min(second) - 5.0).floor().max(0.0);
    let high = (first.max(second) + 5.0).ceil().min(100.0);
    (low, high)
}

fn bar_label(value: f64) -> &'static str {
    if (value - 1.0).abs() < 1e-6 {
        "Serve First"
    } else if (value - 3.0).abs() < 1e-6 {
        "Choose Side"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_range_pads_and_rounds_outward() {
        assert_eq!(percent_axis_range(52.4, 47.6), (42.0, 58.0));
    }

    #[test]
    fn axis_range_stays_within_percent_bounds() {
        assert_eq!(percent_axis_range(99.0, 2.0), (0.0, 100.0));
    }

    #[test]
    fn labels_only_bar_centers() {
        assert_eq!(bar_label(1.0), "Serve First");
        assert_eq!(bar_label(3.0), "Choose Side");
        assert_eq!(bar_label(2.0), "");
    }
}
