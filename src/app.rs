//! End-to-end screening pipeline: generate, analyze, display, save

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::generation::DataGenerator;
use crate::input::manager::read_text;
use crate::input::InputManager;
use crate::llm::TextGenerator;
use crate::output::{save_report_to_file, CandidateReport, ReportGenerator};
use crate::scoring::{self, AnalysisResult, ResumeAnalyzer};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// What `generate_data` actually produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub vacancy_generated: bool,
    pub existing_resumes: usize,
    pub generated_resumes: Vec<PathBuf>,
}

pub struct ScreenerApp<G> {
    config: Config,
    input: InputManager,
    analyzer: ResumeAnalyzer<G>,
    data_generator: DataGenerator<G>,
    reports: ReportGenerator,
}

impl<G: TextGenerator + Clone> ScreenerApp<G> {
    pub fn new(config: Config, generator: G) -> Result<Self> {
        let throttle = config.throttle();
        let max_retries = config.llm.max_retries;

        Ok(Self {
            input: InputManager::from_config(&config),
            analyzer: ResumeAnalyzer::new(generator.clone(), max_retries, throttle)?,
            data_generator: DataGenerator::new(generator, max_retries, throttle),
            reports: ReportGenerator::new(config.output.color_output),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Generate the vacancy if it is missing and top the resume directory up to
    /// the configured count
    pub async fn generate_data(&self) -> Result<GenerationOutcome> {
        info!("Generating test data");
        self.input.ensure_directories().await?;

        let mut outcome = GenerationOutcome::default();
        let vacancy_path = self.input.vacancy_path();

        let vacancy = if self.input.vacancy_exists() {
            info!("Using existing vacancy description: {}", vacancy_path.display());
            self.input.read_vacancy().await?
        } else {
            let vacancy = self.data_generator.generate_vacancy_file(vacancy_path).await?;
            outcome.vacancy_generated = true;
            vacancy
        };

        outcome.existing_resumes = self.input.list_resumes().await?.len();
        let target = self.config.pipeline.num_resumes;

        if outcome.existing_resumes >= target {
            info!("Using existing resumes: {}", outcome.existing_resumes);
            return Ok(outcome);
        }

        let to_generate = target - outcome.existing_resumes;
        info!("Generating {} resumes", to_generate);
        let start_index = self.input.next_resume_index().await?;

        outcome.generated_resumes = self
            .data_generator
            .generate_resumes(self.input.resumes_dir(), &vacancy, to_generate, start_index)
            .await?;
        info!("Generated {} resumes", outcome.generated_resumes.len());

        Ok(outcome)
    }

    /// Score every resume against the vacancy and return them ranked.
    ///
    /// A missing vacancy or resume directory is an error; an empty directory
    /// is not and yields no results.
    pub async fn analyze_resumes(&self) -> Result<Vec<AnalysisResult>> {
        info!("Starting resume analysis");

        let vacancy = self.input.read_vacancy().await?;
        let resumes = self.input.list_resumes().await?;

        if resumes.is_empty() {
            error!("No resumes found. Make sure they have been generated.");
            return Ok(Vec::new());
        }

        let total = resumes.len();
        let mut results = Vec::with_capacity(total);

        for (i, path) in resumes.iter().enumerate() {
            let file_name = file_name_of(path);
            let resume = match read_text(path).await {
                Ok(text) => text,
                Err(e) => {
                    error!("Skipping {}: {}", file_name, e);
                    continue;
                }
            };

            info!("Analyzing resume {}/{}: {}", i + 1, total, file_name);
            let result = self.analyzer.analyze_one(&resume, &vacancy).await;
            results.push(result.with_file_name(file_name));
        }

        Ok(scoring::rank(results))
    }

    /// Score a single resume file, against `vacancy_path` or the configured vacancy
    pub async fn analyze_file(&self, resume_path: &Path, vacancy_path: Option<&Path>) -> Result<AnalysisResult> {
        let vacancy = match vacancy_path {
            Some(path) => read_text(path).await?,
            None => self.input.read_vacancy().await?,
        };
        let resume = read_text(resume_path).await?;
        let file_name = file_name_of(resume_path);

        info!("Analyzing resume 1/1: {}", file_name);
        let result = self.analyzer.analyze_one(&resume, &vacancy).await;
        Ok(result.with_file_name(file_name))
    }

    /// Print the console summary. `None` when there is nothing to show.
    pub fn display_results(&self, ranked: &[AnalysisResult]) -> Result<Option<CandidateReport>> {
        let Some(report) = CandidateReport::from_ranked(ranked, self.config.pipeline.top_n) else {
            warn!("No results to display");
            return Ok(None);
        };

        info!(
            "BEST CANDIDATE: {} with score {:.2}/10",
            report.best_candidate.file_name, report.best_candidate.score
        );

        println!("{}", self.reports.generate_report(&report, &OutputFormat::Console)?);

        let plain = ReportGenerator::new(false).generate_report(&report, &OutputFormat::Console)?;
        info!("Detailed analysis results:\n{}", plain);

        Ok(Some(report))
    }

    /// Write the Markdown and JSON results. A failed write is logged and the
    /// other format is still attempted.
    pub fn save_results(&self, report: &CandidateReport) -> Vec<PathBuf> {
        let targets = [
            (OutputFormat::Markdown, &self.config.output.markdown_path),
            (OutputFormat::Json, &self.config.output.json_path),
        ];

        let mut written = Vec::new();
        for (format, path) in targets {
            let saved = self
                .reports
                .generate_report(report, &format)
                .and_then(|content| save_report_to_file(&content, path));

            match saved {
                Ok(()) => {
                    info!("Results saved to {:?} file: {}", format, path.display());
                    written.push(path.clone());
                }
                Err(e) => error!("Failed to save {:?} results: {}", format, e),
            }
        }
        written
    }

    /// Generate missing data, analyze, display and save
    pub async fn run(&self) -> Result<Option<CandidateReport>> {
        info!("Starting resume screening");

        self.generate_data().await?;
        let report = self.analyze_and_report().await?;

        info!("Resume screening completed successfully");
        Ok(report)
    }

    /// Analyze existing data, display and save
    pub async fn analyze_and_report(&self) -> Result<Option<CandidateReport>> {
        let ranked = self.analyze_resumes().await?;
        let report = self.display_results(&ranked)?;

        match &report {
            Some(report) => {
                self.save_results(report);
            }
            None => warn!("No results to save"),
        }
        Ok(report)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

