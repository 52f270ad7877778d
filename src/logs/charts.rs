//! SVG charts drawn next to a log report

use crate::error::{Result, ScreenerError};
use crate::logs::parser::ResumeAnalysis;
use log::debug;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1000, 600);
const SCORE_BINS: usize = 10;
const MAX_X_LABELS: usize = 20;

/// Count scores per unit-wide bin over [0, 10]. A score of 10 lands in the last bin.
pub fn score_bins(scores: impl IntoIterator<Item = f64>) -> [usize; SCORE_BINS] {
    let mut bins = [0; SCORE_BINS];
    for score in scores {
        let bin = (score.clamp(0.0, 10.0).floor() as usize).min(SCORE_BINS - 1);
        bins[bin] += 1;
    }
    bins
}

struct BarChart<'a> {
    file: String,
    caption: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    labels: &'a [String],
    values: &'a [f64],
    y_max: f64,
}

fn chart_error(e: impl std::fmt::Display) -> ScreenerError {
    ScreenerError::LogAnalysis(format!("Failed to draw chart: {}", e))
}

impl BarChart<'_> {
    fn draw(&self, path: &Path) -> Result<()> {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.caption, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..self.values.len()).into_segmented(), 0f64..self.y_max)
            .map_err(chart_error)?;

        let labels = self.labels;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().min(MAX_X_LABELS))
            .x_label_formatter(&|x: &SegmentValue<usize>| match x {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .x_desc(self.x_desc)
            .y_desc(self.y_desc)
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.mix(0.7).filled())
                    .margin(4)
                    .data(self.values.iter().enumerate().map(|(i, v)| (i, *v))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        Ok(())
    }
}

/// Draw the analysis time, score and score distribution charts into `output_dir`.
///
/// Returns the written paths, or nothing when there are no analyses to plot.
pub fn write_charts(analyses: &[ResumeAnalysis], output_dir: &Path, stamp: &str) -> Result<Vec<PathBuf>> {
    if analyses.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(output_dir)?;

    let indices: Vec<String> = (1..=analyses.len()).map(|i| i.to_string()).collect();
    let times: Vec<f64> = analyses.iter().map(|a| a.time).collect();
    let scores: Vec<f64> = analyses.iter().map(|a| a.score).collect();
    let max_time = times.iter().copied().fold(0.0, f64::max);

    let bins = score_bins(scores.iter().copied());
    let bin_labels: Vec<String> = (0..SCORE_BINS).map(|i| format!("{}-{}", i, i + 1)).collect();
    let bin_counts: Vec<f64> = bins.iter().map(|&count| count as f64).collect();
    let max_count = bins.iter().copied().max().unwrap_or(0) as f64;

    let charts = [
        BarChart {
            file: format!("analysis_time_{}.svg", stamp),
            caption: "Resume analysis time",
            x_desc: "Resume",
            y_desc: "Time (s)",
            labels: &indices,
            values: &times,
            y_max: (max_time * 1.1).max(1.0),
        },
        BarChart {
            file: format!("scores_{}.svg", stamp),
            caption: "Resume scores",
            x_desc: "Resume",
            y_desc: "Score (0-10)",
            labels: &indices,
            values: &scores,
            y_max: 10.0,
        },
        BarChart {
            file: format!("score_distribution_{}.svg", stamp),
            caption: "Score distribution",
            x_desc: "Score",
            y_desc: "Resumes",
            labels: &bin_labels,
            values: &bin_counts,
            y_max: max_count + 1.0,
        },
    ];

    let mut written = Vec::with_capacity(charts.len());
    for chart in &charts {
        let path = output_dir.join(&chart.file);
        chart.draw(&path)?;
        debug!("Chart saved to: {}", path.display());
        written.push(path);
    }
    Ok(written)
}
