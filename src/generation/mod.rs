//! Synthetic data generation: vacancy text, tiered resumes and batch statistics

pub mod generator;
pub mod stats;
pub mod tiers;

pub use generator::DataGenerator;
pub use tiers::{tier_plan, QualityTier, TierDistribution};
