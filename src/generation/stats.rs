//! Summary of one resume generation batch

use crate::error::Result;
use crate::generation::tiers::TierDistribution;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STATS_FILE_NAME: &str = "generation_stats.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStats {
    pub total_resumes: usize,
    pub quality_distribution: TierDistribution,
    pub generation_time_secs: f64,
    pub average_time_per_resume: f64,
    pub timestamp: String,
}

impl GenerationStats {
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("Resume generation statistics\n");
        output.push_str(&format!("Date and time: {}\n", self.timestamp));
        output.push_str(&format!("Resumes generated: {}\n", self.total_resumes));
        output.push_str("Quality distribution:\n");
        output.push_str(&format!("  - high: {}\n", self.quality_distribution.high));
        output.push_str(&format!("  - medium: {}\n", self.quality_distribution.medium));
        output.push_str(&format!("  - low: {}\n", self.quality_distribution.low));
        output.push_str(&format!("Total generation time: {:.2} seconds\n", self.generation_time_secs));
        output.push_str(&format!("Average time per resume: {:.2} seconds\n", self.average_time_per_resume));
        output
    }

    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(STATS_FILE_NAME);
        std::fs::write(&path, self.render())?;
        Ok(path)
    }
}
