//! Resume quality tiers and their distribution across a batch

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How closely a generated resume is steered to match the vacancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    /// Sampling temperature; weaker matches get more randomness
    pub fn temperature(self) -> f32 {
        match self {
            QualityTier::Low => 0.9,
            QualityTier::Medium => 0.7,
            QualityTier::High => 0.5,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            QualityTier::Low => "The resume should match the vacancy poorly, with few overlaps in the required skills and experience.",
            QualityTier::Medium => "The resume should match the vacancy moderately, with a partial overlap in the required skills and experience.",
            QualityTier::High => "The resume should match the vacancy well, with a strong overlap in the required skills and experience.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of resumes per tier in one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierDistribution {
    /// 20% high, 50% medium, the remainder low
    pub fn for_count(count: usize) -> Self {
        let high = count * 20 / 100;
        let medium = count * 50 / 100;
        Self {
            high,
            medium,
            low: count - high - medium,
        }
    }

    /// Actual tier counts of an existing plan
    pub fn from_plan(plan: &[QualityTier]) -> Self {
        let count = |tier: QualityTier| plan.iter().filter(|t| **t == tier).count();
        Self {
            high: count(QualityTier::High),
            medium: count(QualityTier::Medium),
            low: count(QualityTier::Low),
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    pub fn count_of(&self, tier: QualityTier) -> usize {
        match tier {
            QualityTier::High => self.high,
            QualityTier::Medium => self.medium,
            QualityTier::Low => self.low,
        }
    }
}

impl fmt::Display for TierDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "high: {}, medium: {}, low: {}", self.high, self.medium, self.low)
    }
}

/// Shuffled tier assignment for `count` resumes
pub fn tier_plan<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<QualityTier> {
    let distribution = TierDistribution::for_count(count);

    let mut plan = Vec::with_capacity(count);
    for tier in [QualityTier::High, QualityTier::Medium, QualityTier::Low] {
        plan.extend(std::iter::repeat(tier).take(distribution.count_of(tier)));
    }
    plan.shuffle(rng);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_distribution_for_ten() {
        assert_eq!(
            TierDistribution::for_count(10),
            TierDistribution { high: 2, medium: 5, low: 3 }
        );
    }

    #[test]
    fn test_remainder_folds_into_low() {
        let d = TierDistribution::for_count(7);
        assert_eq!((d.high, d.medium, d.low), (1, 3, 3));
        assert_eq!(TierDistribution::for_count(0).total(), 0);
        assert_eq!(TierDistribution::for_count(1).low, 1);
    }

    #[test]
    fn test_plan_counts_hold_for_any_seed() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = tier_plan(10, &mut rng);

            assert_eq!(plan.len(), 10);
            assert_eq!(
                TierDistribution::from_plan(&plan),
                TierDistribution { high: 2, medium: 5, low: 3 }
            );
        }
    }

    #[test]
    fn test_tier_temperatures() {
        assert_eq!(QualityTier::Low.temperature(), 0.9);
        assert_eq!(QualityTier::Medium.temperature(), 0.7);
        assert_eq!(QualityTier::High.temperature(), 0.5);
    }
}
