//! CLI interface for the resume screener

use crate::config::{Config, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Generate synthetic resumes, score them against a vacancy and pick the best candidates")]
#[command(long_about = "Score resumes against a job vacancy with a language model, falling back to keyword heuristics when the model is unavailable, and analyze the resulting run logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Overrides for values that otherwise come from the config file
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineOverrides {
    /// Data directory holding `vacancy/` and `resumes/`
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Completion model to use
    #[arg(long)]
    pub model: Option<String>,

    /// Pause after each analyzed or generated item, in seconds
    #[arg(long)]
    pub throttle: Option<f64>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate missing data, analyze every resume and report the best candidates
    Run {
        /// Number of resumes the data directory should hold
        #[arg(short, long)]
        num_resumes: Option<usize>,

        /// Number of top candidates to report
        #[arg(short, long)]
        top_n: Option<usize>,

        #[command(flatten)]
        overrides: PipelineOverrides,
    },

    /// Generate the vacancy and resumes only
    Generate {
        /// Number of resumes the data directory should hold
        #[arg(short, long)]
        num_resumes: Option<usize>,

        #[command(flatten)]
        overrides: PipelineOverrides,
    },

    /// Analyze existing resumes without generating any
    Analyze {
        /// Number of top candidates to report
        #[arg(short, long)]
        top_n: Option<usize>,

        #[command(flatten)]
        overrides: PipelineOverrides,
    },

    /// Score a single resume file against the vacancy
    Score {
        /// Path to the resume text file
        resume: PathBuf,

        /// Vacancy file to score against, instead of the configured one
        #[arg(long)]
        vacancy: Option<PathBuf>,

        /// Use keyword heuristics only, without calling the completion API
        #[arg(long)]
        no_llm: bool,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        #[command(flatten)]
        overrides: PipelineOverrides,
    },

    /// Run log analysis and maintenance
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum LogsAction {
    /// Parse a log file and write a text report
    Report {
        /// Log file to analyze
        #[arg(long, conflicts_with = "latest")]
        log_file: Option<PathBuf>,

        /// Analyze the most recent log file
        #[arg(long)]
        latest: bool,

        /// Directory for the report, instead of the configured one
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List log files, newest first
    List,

    /// Summarize the logs directory
    Info,

    /// Delete all but the newest log files
    Clean {
        /// Number of log files to keep
        #[arg(short, long)]
        keep: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

impl Commands {
    /// Commands that drive the pipeline get their own log file
    pub fn writes_run_log(&self) -> bool {
        matches!(
            self,
            Commands::Run { .. } | Commands::Generate { .. } | Commands::Analyze { .. } | Commands::Score { .. }
        )
    }
}

impl PipelineOverrides {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(data_dir) = &self.data_dir {
            config.pipeline.data_dir = data_dir.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(throttle) = self.throttle {
            config.pipeline.throttle_secs = throttle;
        }
        if self.no_color {
            config.output.color_output = false;
        }
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_run_overrides_apply() {
        let cli = Cli::parse_from([
            "resume-screener",
            "run",
            "--num-resumes",
            "10",
            "--data-dir",
            "/tmp/screening",
            "--throttle",
            "0",
            "--no-color",
        ]);

        let Commands::Run { num_resumes, top_n, overrides } = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(num_resumes, Some(10));
        assert_eq!(top_n, None);

        let mut config = Config::default();
        overrides.apply(&mut config);
        assert_eq!(config.pipeline.data_dir, PathBuf::from("/tmp/screening"));
        assert_eq!(config.pipeline.throttle_secs, 0.0);
        assert!(!config.output.color_output);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_logs_report_flags_conflict() {
        let parsed = Cli::try_parse_from([
            "resume-screener",
            "logs",
            "report",
            "--latest",
            "--log-file",
            "run.log",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::parse_from(["resume-screener", "logs", "list", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Logs { action: LogsAction::List }));
    }
}
