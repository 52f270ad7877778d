//! Text report over parsed log data

use crate::error::Result;
use crate::logs::charts::write_charts;
use crate::logs::parser::{LogData, LogEntry, ResumeAnalysis};
use log::{info, warn};
use std::path::{Path, PathBuf};

const TOP_RESUMES: usize = 5;
const RULE_WIDTH: usize = 80;

/// Mean, max and min of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl Summary {
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;

        for v in values {
            count += 1;
            sum += v;
            max = max.max(v);
            min = min.min(v);
        }

        (count > 0).then(|| Self {
            mean: sum / count as f64,
            max,
            min,
        })
    }
}

/// Highest-scoring analyses, at most `n`; equal scores keep log order
pub fn top_analyses(analyses: &[ResumeAnalysis], n: usize) -> Vec<&ResumeAnalysis> {
    let mut sorted: Vec<&ResumeAnalysis> = analyses.iter().collect();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted.truncate(n);
    sorted
}

fn write_entries(out: &mut String, title: &str, entries: &[LogEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str(&format!("{}:\n", title));
    for entry in entries {
        out.push_str(&format!("[{}] {}: {}\n", entry.timestamp, entry.target, entry.message));
    }
    out.push('\n');
}

pub fn render_report(data: &LogData) -> String {
    let mut out = String::new();
    let not_found = "not found";

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\nRESUME SCREENING LOG REPORT\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    out.push_str("GENERAL INFORMATION:\n");
    out.push_str(&format!("Start time: {}\n", data.start_time.as_deref().unwrap_or(not_found)));
    out.push_str(&format!("End time: {}\n", data.end_time.as_deref().unwrap_or(not_found)));
    out.push_str(&format!("INFO records: {}\n", data.info_count));
    out.push_str(&format!("WARNING records: {}\n", data.warning_count));
    out.push_str(&format!("ERROR records: {}\n", data.error_count));
    out.push_str(&format!("DEBUG records: {}\n\n", data.debug_count));

    out.push_str("ANALYSIS RESULTS:\n");
    out.push_str(&format!("Resumes analyzed: {}\n", data.resume_analyses.len()));
    let times = Summary::of(data.resume_analyses.iter().map(|a| a.time));
    let scores = Summary::of(data.resume_analyses.iter().map(|a| a.score));
    if let (Some(times), Some(scores)) = (times, scores) {
        out.push_str(&format!("Average analysis time: {:.2} s\n", times.mean));
        out.push_str(&format!("Maximum analysis time: {:.2} s\n", times.max));
        out.push_str(&format!("Minimum analysis time: {:.2} s\n", times.min));
        out.push_str(&format!("Average score: {:.2}/10\n", scores.mean));
        out.push_str(&format!("Maximum score: {:.2}/10\n", scores.max));
        out.push_str(&format!("Minimum score: {:.2}/10\n", scores.min));
    }
    out.push('\n');

    out.push_str("BEST CANDIDATE:\n");
    match &data.best_candidate {
        Some(file) => {
            out.push_str(&format!("File: {}\n", file));
            out.push_str(&format!("Score: {:.2}/10\n\n", data.best_score));
        }
        None => out.push_str("No best candidate information found\n\n"),
    }

    write_entries(&mut out, "ERRORS", &data.errors);
    write_entries(&mut out, "WARNINGS", &data.warnings);

    if !data.resume_analyses.is_empty() {
        out.push_str("TOP RESUMES BY SCORE:\n");
        for (i, analysis) in top_analyses(&data.resume_analyses, TOP_RESUMES).iter().enumerate() {
            out.push_str(&format!("{}. {} - Score: {:.2}/10\n", i + 1, analysis.resume, analysis.score));
        }
        out.push('\n');
    }

    out
}

/// Files produced by one report run
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub report: PathBuf,
    pub charts: Vec<PathBuf>,
}

/// Write `log_report_<timestamp>.txt` into `output_dir`, creating it if needed,
/// plus the charts for the same timestamp when the log holds analyses
pub fn write_report(data: &LogData, output_dir: &Path) -> Result<ReportFiles> {
    std::fs::create_dir_all(output_dir)?;
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let path = output_dir.join(format!("log_report_{}.txt", stamp));

    std::fs::write(&path, render_report(data))?;
    info!("Report saved to: {}", path.display());

    let charts = match write_charts(&data.resume_analyses, output_dir, &stamp) {
        Ok(charts) => charts,
        Err(e) => {
            warn!("Charts were not drawn: {}", e);
            Vec::new()
        }
    };
    if !charts.is_empty() {
        info!("Charts saved to: {}", output_dir.display());
    }

    Ok(ReportFiles { report: path, charts })
}
