//! Synthetic vacancy and resume generation

use crate::error::{Result, ScreenerError};
use crate::generation::stats::GenerationStats;
use crate::generation::tiers::{tier_plan, QualityTier, TierDistribution};
use crate::input::manager::resume_file_name;
use crate::llm::prompts::PromptTemplates;
use crate::llm::TextGenerator;
use crate::scoring::analyzer::preview;
use anyhow::{bail, Context};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Vacancy text benefits from a little more variety than scoring
pub const VACANCY_TEMPERATURE: f32 = 0.8;

/// Produces vacancy and resume texts through a [`TextGenerator`]
pub struct DataGenerator<G> {
    generator: G,
    templates: PromptTemplates,
    max_retries: u32,
    throttle: Duration,
}

impl<G: TextGenerator> DataGenerator<G> {
    pub fn new(generator: G, max_retries: u32, throttle: Duration) -> Self {
        info!("Initialized data generator");
        Self {
            generator,
            templates: PromptTemplates::default(),
            max_retries,
            throttle,
        }
    }

    pub async fn generate_vacancy(&self) -> String {
        info!("Generating vacancy description");
        self.generator
            .generate(&self.templates.render_vacancy(), VACANCY_TEMPERATURE, self.max_retries)
            .await
    }

    pub async fn generate_resume(&self, vacancy: &str, tier: QualityTier) -> String {
        info!(
            "Generating resume with match quality: {}, temperature: {}",
            tier,
            tier.temperature()
        );
        self.generator
            .generate(&self.templates.render_resume(vacancy, tier), tier.temperature(), self.max_retries)
            .await
    }

    /// Generate a vacancy and write it to `path`. An empty response is an error.
    pub async fn generate_vacancy_file(&self, path: &Path) -> Result<String> {
        info!("Generating vacancy description into: {}", path.display());

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let start = Instant::now();
        let vacancy = self.generate_vacancy().await;
        if vacancy.trim().is_empty() {
            return Err(ScreenerError::Generation(
                "The completion API returned no vacancy text".to_string(),
            ));
        }

        info!("Vacancy description generated in {:.2} seconds", start.elapsed().as_secs_f64());
        debug!("Vacancy starts with: {}", preview(&vacancy, 100));

        tokio::fs::write(path, &vacancy).await?;
        info!("Vacancy description saved to: {}", path.display());
        Ok(vacancy)
    }

    /// Generate `count` resumes into `output_dir`, numbered from `start_index`.
    ///
    /// Individual failures are logged and skipped; the returned paths cover only
    /// the resumes that were written.
    pub async fn generate_resumes(
        &self,
        output_dir: &Path,
        vacancy: &str,
        count: usize,
        start_index: usize,
    ) -> Result<Vec<PathBuf>> {
        let plan = tier_plan(count, &mut rand::thread_rng());
        self.generate_resumes_with_plan(output_dir, vacancy, &plan, start_index).await
    }

    pub async fn generate_resumes_with_plan(
        &self,
        output_dir: &Path,
        vacancy: &str,
        plan: &[QualityTier],
        start_index: usize,
    ) -> Result<Vec<PathBuf>> {
        let count = plan.len();
        info!("Generating {} resumes into: {}", count, output_dir.display());
        tokio::fs::create_dir_all(output_dir).await?;

        let distribution = TierDistribution::from_plan(plan);
        info!("Resume quality distribution: {}", distribution);

        let mut written = Vec::with_capacity(count);
        let batch_start = Instant::now();

        for (i, tier) in plan.iter().copied().enumerate() {
            let file_name = resume_file_name(start_index + i);
            let path = output_dir.join(&file_name);
            info!("Generating resume {}/{}: {} (quality: {})", i + 1, count, file_name, tier);

            let start = Instant::now();
            match self.write_resume(&path, vacancy, tier).await {
                Ok(()) => {
                    info!("Resume {} generated in {:.2} seconds", file_name, start.elapsed().as_secs_f64());
                    written.push(path);

                    if (i + 1) % 10 == 0 || i + 1 == count {
                        info!(
                            "Progress: {}/{} resumes ({:.1}%)",
                            i + 1,
                            count,
                            (i + 1) as f64 / count as f64 * 100.0
                        );
                    }

                    if !self.throttle.is_zero() {
                        debug!("Pausing {:.1}s before the next resume", self.throttle.as_secs_f64());
                        tokio::time::sleep(self.throttle).await;
                    }
                }
                Err(e) => error!("Failed to generate resume {}: {:#}", file_name, e),
            }
        }

        let elapsed = batch_start.elapsed().as_secs_f64();
        let average = elapsed / count.max(1) as f64;
        info!("Generated {} of {} resumes in: {}", written.len(), count, output_dir.display());
        info!("Total generation time: {:.2} seconds ({:.2} seconds per resume)", elapsed, average);

        let stats = GenerationStats {
            total_resumes: written.len(),
            quality_distribution: distribution,
            generation_time_secs: elapsed,
            average_time_per_resume: average,
            timestamp: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        };
        match stats.write_to(output_dir) {
            Ok(path) => info!("Generation statistics saved to: {}", path.display()),
            Err(e) => warn!("Could not save generation statistics: {}", e),
        }

        Ok(written)
    }

    async fn write_resume(&self, path: &Path, vacancy: &str, tier: QualityTier) -> anyhow::Result<()> {
        let resume = self.generate_resume(vacancy, tier).await;
        if resume.trim().is_empty() {
            bail!("the completion API returned no resume text");
        }
        debug!("Resume starts with: {}", preview(&resume, 100));

        tokio::fs::write(path, &resume)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
