//! Shared helpers for integration tests

#![allow(dead_code)]

use resume_screener::config::Config;
use resume_screener::llm::TextGenerator;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One recorded `generate` call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub prompt: String,
    pub temperature: f32,
    pub max_retries: u32,
}

/// Replays canned responses in order; an exhausted script behaves like an
/// unreachable API and returns empty text
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Into::into).collect())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, temperature: f32, max_retries: u32) -> String {
        self.calls.lock().unwrap().push(Call {
            prompt: prompt.to_string(),
            temperature,
            max_retries,
        });
        self.responses.lock().unwrap().pop_front().unwrap_or_default()
    }
}

/// Defaults rooted in `root`, with no throttle and no colors
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.pipeline.data_dir = root.join("data");
    config.pipeline.throttle_secs = 0.0;
    config.output.json_path = root.join("results.json");
    config.output.markdown_path = root.join("results.md");
    config.output.color_output = false;
    config.logging.logs_dir = root.join("logs");
    config.logging.reports_dir = root.join("reports");
    config
}
