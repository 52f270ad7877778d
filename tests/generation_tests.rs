//! Integration tests for synthetic data generation

mod common;

use common::ScriptedGenerator;
use resume_screener::generation::generator::VACANCY_TEMPERATURE;
use resume_screener::generation::stats::STATS_FILE_NAME;
use resume_screener::generation::{DataGenerator, QualityTier};
use std::time::Duration;

fn temperatures(generator: &ScriptedGenerator) -> Vec<f32> {
    generator.calls().iter().map(|c| c.temperature).collect()
}

#[tokio::test]
async fn test_empty_responses_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new(["First resume", "   ", "Third resume"]);
    let data = DataGenerator::new(generator.clone(), 3, Duration::ZERO);

    let plan = [QualityTier::High, QualityTier::Low, QualityTier::Medium];
    let written = data
        .generate_resumes_with_plan(dir.path(), "Vacancy text", &plan, 4)
        .await
        .unwrap();

    assert_eq!(written, vec![dir.path().join("resume_004.txt"), dir.path().join("resume_006.txt")]);
    assert!(!dir.path().join("resume_005.txt").exists());
    assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "Third resume");
    assert_eq!(temperatures(&generator), vec![0.5, 0.9, 0.7]);

    let stats = std::fs::read_to_string(dir.path().join(STATS_FILE_NAME)).unwrap();
    assert!(stats.contains("Resumes generated: 2"));
    assert!(stats.contains("  - high: 1"));
    assert!(stats.contains("  - low: 1"));
}

#[tokio::test]
async fn test_batch_follows_tier_distribution() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new((1..=10).map(|i| format!("Resume number {}", i)));
    let data = DataGenerator::new(generator.clone(), 3, Duration::ZERO);

    let written = data.generate_resumes(dir.path(), "Vacancy text", 10, 1).await.unwrap();
    assert_eq!(written.len(), 10);
    assert!(dir.path().join("resume_001.txt").exists());
    assert!(dir.path().join("resume_010.txt").exists());

    let temps = temperatures(&generator);
    let count = |t: f32| temps.iter().filter(|x| **x == t).count();
    assert_eq!(count(QualityTier::High.temperature()), 2);
    assert_eq!(count(QualityTier::Medium.temperature()), 5);
    assert_eq!(count(QualityTier::Low.temperature()), 3);

    for call in generator.calls() {
        assert!(call.prompt.contains("Vacancy text"));
    }
}

#[tokio::test]
async fn test_vacancy_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vacancy").join("vacancy.txt");
    let generator = ScriptedGenerator::new(["Python developer wanted"]);
    let data = DataGenerator::new(generator.clone(), 3, Duration::ZERO);

    let vacancy = data.generate_vacancy_file(&path).await.unwrap();
    assert_eq!(vacancy, "Python developer wanted");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), vacancy);
    assert_eq!(temperatures(&generator), vec![VACANCY_TEMPERATURE]);
}

#[tokio::test]
async fn test_empty_vacancy_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vacancy.txt");
    let data = DataGenerator::new(ScriptedGenerator::default(), 3, Duration::ZERO);

    assert!(data.generate_vacancy_file(&path).await.is_err());
    assert!(!path.exists());
}
