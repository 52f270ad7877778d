//! Output formatters for candidate reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::CandidateReport;
use crate::scoring::AnalysisResult;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting candidate reports
pub trait OutputFormatter {
    fn format_report(&self, report: &CandidateReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console summary with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON document `{best_candidate, top_candidates, analysis_date}`
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown document with the same information as the JSON one
pub struct MarkdownFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const RULE_WIDTH: usize = 80;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 8.0 => Color::Green,
            s if s >= 5.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score(&self, score: f64) -> String {
        self.colorize(&format!("{:.2}/10", score), Self::score_color(score))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &CandidateReport) -> Result<String> {
        let best = &report.best_candidate;
        let mut output = String::new();

        output.push('\n');
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!("{} {}\n", self.colorize("BEST CANDIDATE:", Color::Blue), best.file_name));
        output.push_str(&format!("Score: {}\n", self.format_score(best.score)));
        output.push_str(&format!("Justification: {}\n", best.justification));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        output.push_str(&self.colorize(&format!("TOP-{} CANDIDATES:", report.shown()), Color::Blue));
        output.push('\n');
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        for (i, candidate) in report.top_candidates.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, candidate.file_name));
            output.push_str(&format!("   Score: {}\n", self.format_score(candidate.score)));
            output.push_str(&format!("   Justification: {}\n", candidate.justification));
            output.push_str(&"-".repeat(RULE_WIDTH));
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &CandidateReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| ScreenerError::OutputFormatting(format!("Failed to render JSON report: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn format_candidate_fields(candidate: &AnalysisResult) -> String {
        format!(
            "**Score**: {:.2}/10  \n**Justification**: {}\n\n",
            candidate.score, candidate.justification
        )
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &CandidateReport) -> Result<String> {
        let mut output = String::from("# Resume Analysis Results\n\n");

        output.push_str("## Best candidate\n");
        output.push_str(&format!("**File**: {}  \n", report.best_candidate.file_name));
        output.push_str(&Self::format_candidate_fields(&report.best_candidate));

        output.push_str(&format!("## Top {} candidates\n\n", report.shown()));
        for (i, candidate) in report.top_candidates.iter().enumerate() {
            output.push_str(&format!("### {}. {}\n", i + 1, candidate.file_name));
            output.push_str(&Self::format_candidate_fields(candidate));
        }

        output.push_str(&format!("---\n*Analysis completed: {}*\n", report.analysis_date));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, report: &CandidateReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}
