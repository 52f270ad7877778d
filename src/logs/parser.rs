//! Parsing of run log files into aggregate data

use crate::error::{Result, ScreenerError};
use log::{debug, info};
use regex::Regex;
use serde::Serialize;
use std::path::Path;

/// Timing and score of one analyzed resume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeAnalysis {
    pub resume: String,
    pub time: f64,
    pub score: f64,
}

/// A warning or error line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogData {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub info_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
    pub debug_count: usize,
    pub resume_analyses: Vec<ResumeAnalysis>,
    pub best_candidate: Option<String>,
    pub best_score: f64,
    pub errors: Vec<LogEntry>,
    pub warnings: Vec<LogEntry>,
}

pub struct LogParser {
    line: Regex,
    resume_name: Regex,
    analysis_time: Regex,
    best_candidate: Regex,
}

impl LogParser {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| ScreenerError::LogAnalysis(format!("Invalid pattern '{}': {}", pattern, e)))
        };

        Ok(Self {
            line: compile(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}) - (\S+) - (\w+) - (.*)$")?,
            resume_name: compile(r"Analyzing resume \d+/\d+: (resume_\d+\.txt)")?,
            analysis_time: compile(
                r"Resume analysis completed in (\d+(?:\.\d+)?) seconds\. Score: (\d+(?:\.\d+)?)/10",
            )?,
            best_candidate: compile(r"BEST CANDIDATE: (resume_\d+\.txt) with score (\d+(?:\.\d+)?)/10")?,
        })
    }

    pub fn parse_log_file(&self, path: &Path) -> Result<LogData> {
        if !path.is_file() {
            return Err(ScreenerError::LogAnalysis(format!(
                "Log file not found: {}",
                path.display()
            )));
        }

        info!("Analyzing log file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(self.parse_lines(content.lines()))
    }

    /// Lines that don't follow the log layout (continuations, stray output) are skipped
    pub fn parse_lines<'a, I>(&self, lines: I) -> LogData
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut data = LogData::default();
        let mut current_resume: Option<String> = None;

        for line in lines {
            let Some(caps) = self.line.captures(line.trim_end()) else {
                continue;
            };
            let (timestamp, target, level, message) = (&caps[1], &caps[2], &caps[3], &caps[4]);

            if data.start_time.is_none() {
                data.start_time = Some(timestamp.to_string());
            }
            data.end_time = Some(timestamp.to_string());

            let entry = || LogEntry {
                timestamp: timestamp.to_string(),
                target: target.to_string(),
                message: message.to_string(),
            };

            match level {
                "INFO" => data.info_count += 1,
                "WARN" | "WARNING" => {
                    data.warning_count += 1;
                    data.warnings.push(entry());
                }
                "ERROR" => {
                    data.error_count += 1;
                    data.errors.push(entry());
                }
                "DEBUG" => data.debug_count += 1,
                _ => {}
            }

            if let Some(m) = self.resume_name.captures(message) {
                current_resume = Some(m[1].to_string());
            }

            if let (Some(m), Some(resume)) = (self.analysis_time.captures(message), &current_resume) {
                if let (Ok(time), Ok(score)) = (m[1].parse::<f64>(), m[2].parse::<f64>()) {
                    data.resume_analyses.push(ResumeAnalysis {
                        resume: resume.clone(),
                        time,
                        score,
                    });
                }
            }

            if let Some(m) = self.best_candidate.captures(message) {
                data.best_candidate = Some(m[1].to_string());
                data.best_score = m[2].parse().unwrap_or(0.0);
            }
        }

        debug!(
            "Parsed {} analyses, {} warnings, {} errors",
            data.resume_analyses.len(),
            data.warning_count,
            data.error_count
        );
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2026-10-19 10:00:00,001 - resume_screener::app - INFO - Starting resume screening
2026-10-19 10:00:01,000 - resume_screener::app - INFO - Analyzing resume 1/2: resume_001.txt
2026-10-19 10:00:01,500 - resume_screener::scoring::analyzer - WARN - Model response failed validation, using fallback scorer
2026-10-19 10:00:04,000 - resume_screener::scoring::analyzer - INFO - Resume analysis completed in 3.02 seconds. Score: 5.00/10
2026-10-19 10:00:04,100 - resume_screener::app - INFO - Analyzing resume 2/2: resume_002.txt
2026-10-19 10:00:04,200 - resume_screener::llm::client - DEBUG - Attempt 1/3
2026-10-19 10:00:07,000 - resume_screener::scoring::analyzer - INFO - Resume analysis completed in 2.90 seconds. Score: 8.50/10
2026-10-19 10:00:07,100 - resume_screener::app - ERROR - Failed to save Markdown results: disk full
   continuation line without a header
2026-10-19 10:00:07,200 - resume_screener::app - INFO - BEST CANDIDATE: resume_002.txt with score 8.50/10
";

    #[test]
    fn test_counts_and_range() {
        let data = LogParser::new().unwrap().parse_lines(SAMPLE.lines());

        assert_eq!(data.start_time.as_deref(), Some("2026-10-19 10:00:00,001"));
        assert_eq!(data.end_time.as_deref(), Some("2026-10-19 10:00:07,200"));
        assert_eq!(data.info_count, 6);
        assert_eq!(data.warning_count, 1);
        assert_eq!(data.error_count, 1);
        assert_eq!(data.debug_count, 1);
        assert_eq!(data.errors[0].target, "resume_screener::app");
        assert_eq!(data.errors[0].message, "Failed to save Markdown results: disk full");
    }

    #[test]
    fn test_analyses_are_attributed_to_current_resume() {
        let data = LogParser::new().unwrap().parse_lines(SAMPLE.lines());

        assert_eq!(
            data.resume_analyses,
            vec![
                ResumeAnalysis { resume: "resume_001.txt".into(), time: 3.02, score: 5.0 },
                ResumeAnalysis { resume: "resume_002.txt".into(), time: 2.90, score: 8.5 },
            ]
        );
        assert_eq!(data.best_candidate.as_deref(), Some("resume_002.txt"));
        assert_eq!(data.best_score, 8.5);
    }

    #[test]
    fn test_timing_without_resume_is_ignored() {
        let lines = ["2026-10-19 10:00:04,000 - x - INFO - Resume analysis completed in 1.00 seconds. Score: 2.00/10"];
        let data = LogParser::new().unwrap().parse_lines(lines);
        assert!(data.resume_analyses.is_empty());
        assert_eq!(data.info_count, 1);
    }

    #[test]
    fn test_python_style_warning_level() {
        let lines = ["2026-10-19 10:00:04,000 - root - WARNING - old style"];
        let data = LogParser::new().unwrap().parse_lines(lines);
        assert_eq!(data.warning_count, 1);
    }

    #[test]
    fn test_missing_file() {
        let parser = LogParser::new().unwrap();
        assert!(matches!(
            parser.parse_log_file(Path::new("/nonexistent/run.log")),
            Err(ScreenerError::LogAnalysis(_))
        ));
    }
}
