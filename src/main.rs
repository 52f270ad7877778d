//! Resume screener: score resumes against a vacancy and report the best candidates

use clap::Parser;
use log::{error, info};
use resume_screener::app::ScreenerApp;
use resume_screener::cli::{self, Cli, Commands, ConfigAction, LogsAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::manager::read_text;
use resume_screener::llm::CompletionClient;
use resume_screener::logging::{init_logging, RunContext};
use resume_screener::logs::{self, files::render_logs_info, LogParser};
use resume_screener::scoring::{AnalysisResult, FallbackScorer};
use resume_screener::{Result, ScreenerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(cli.verbose, None);
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let run = if cli.command.writes_run_log() {
        match RunContext::new(&config.logging.logs_dir) {
            Ok(run) => Some(run),
            Err(e) => {
                let _ = init_logging(cli.verbose, None);
                error!("Failed to create logs directory: {}", e);
                process::exit(1);
            }
        }
    } else {
        None
    };

    if let Err(e) = init_logging(cli.verbose, run.as_ref()) {
        eprintln!("{}", e);
    }
    if let Some(run) = &run {
        info!("Writing logs to: {}", run.log_file().display());
    }

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn build_app(config: Config) -> Result<ScreenerApp<CompletionClient>> {
    config.validate()?;
    let client = CompletionClient::new(&config.llm, Config::api_key()?)?;
    ScreenerApp::new(config, client)
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Run {
            num_resumes,
            top_n,
            overrides,
        } => {
            overrides.apply(&mut config);
            if let Some(n) = num_resumes {
                config.pipeline.num_resumes = n;
            }
            if let Some(n) = top_n {
                config.pipeline.top_n = n;
            }

            let app = build_app(config)?;
            app.run().await?;
        }

        Commands::Generate { num_resumes, overrides } => {
            overrides.apply(&mut config);
            if let Some(n) = num_resumes {
                config.pipeline.num_resumes = n;
            }

            let app = build_app(config)?;
            let outcome = app.generate_data().await?;

            println!("\n📂 Data directory: {}", app.config().pipeline.data_dir.display());
            if outcome.vacancy_generated {
                println!("💼 Vacancy generated: {}", app.input().vacancy_path().display());
            }
            println!(
                "📄 Resumes: {} existing, {} generated",
                outcome.existing_resumes,
                outcome.generated_resumes.len()
            );
        }

        Commands::Analyze { top_n, overrides } => {
            overrides.apply(&mut config);
            if let Some(n) = top_n {
                config.pipeline.top_n = n;
            }

            let app = build_app(config)?;
            app.analyze_and_report().await?;
        }

        Commands::Score {
            resume,
            vacancy,
            no_llm,
            output,
            overrides,
        } => {
            overrides.apply(&mut config);
            let output_format = cli::parse_output_format(&output).map_err(ScreenerError::InvalidInput)?;

            let result = if no_llm {
                info!("Scoring {} with keyword heuristics only", resume.display());
                let text = read_text(&resume).await?;
                FallbackScorer::new()?
                    .score(&text, "")
                    .with_file_name(file_name_of(&resume))
            } else {
                build_app(config)?.analyze_file(&resume, vacancy.as_deref()).await?
            };

            print_score(&result, output_format)?;
        }

        Commands::Logs { action } => run_logs_command(action, &config)?,

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("📋 Configuration: {}\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults: {}", config_path.display());
            }
        },
    }

    Ok(())
}

fn run_logs_command(action: LogsAction, config: &Config) -> Result<()> {
    let logs_dir = &config.logging.logs_dir;

    match action {
        LogsAction::Report {
            log_file,
            latest,
            output_dir,
        } => {
            let log_file: PathBuf = match (log_file, latest) {
                (Some(path), _) => path,
                (None, true) => logs::latest_log_file(logs_dir)?.ok_or_else(|| {
                    ScreenerError::LogAnalysis(format!("No log files found in {}", logs_dir.display()))
                })?,
                (None, false) => {
                    return Err(ScreenerError::InvalidInput(
                        "Specify --latest or --log-file <PATH>".to_string(),
                    ))
                }
            };

            let data = LogParser::new()?.parse_log_file(&log_file)?;
            let output_dir = output_dir.unwrap_or_else(|| config.logging.reports_dir.clone());
            let files = logs::write_report(&data, &output_dir)?;
            println!("📊 Report saved to: {}", files.report.display());
            for chart in &files.charts {
                println!("📈 Chart saved to: {}", chart.display());
            }
        }

        LogsAction::List => {
            let files = logs::list_log_files(logs_dir)?;
            if files.is_empty() {
                println!("No log files found");
            } else {
                println!("Available log files:");
                for (i, file) in files.iter().enumerate() {
                    println!("{}. {}", i + 1, file.name);
                }
            }
        }

        LogsAction::Info => {
            let files = logs::list_log_files(logs_dir)?;
            println!("{}", render_logs_info(logs_dir, &files));
        }

        LogsAction::Clean { keep } => {
            let keep = keep.unwrap_or(config.logging.keep_logs);
            let summary = logs::clean_old_logs(logs_dir, keep)?;
            println!(
                "🧹 Deleted {} of {} old log files (kept {})",
                summary.deleted, summary.candidates, keep
            );
        }
    }

    Ok(())
}

fn print_score(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Console | OutputFormat::Markdown => {
            println!("\n📄 {}", result.file_name);
            println!("Score: {:.2}/10", result.score);
            println!("Justification: {}", result.justification);
        }
    }
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
