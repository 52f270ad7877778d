//! Input manager for the vacancy file and the resume directory

use crate::config::Config;
use crate::error::{Result, ScreenerError};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;

const RESUME_PREFIX: &str = "resume_";
const RESUME_EXTENSION: &str = ".txt";

/// File name of the resume with the given 1-based index
pub fn resume_file_name(index: usize) -> String {
    format!("{}{:03}{}", RESUME_PREFIX, index, RESUME_EXTENSION)
}

/// Whether `name` looks like a generated resume file
pub fn is_resume_file(name: &str) -> bool {
    name.starts_with(RESUME_PREFIX) && name.ends_with(RESUME_EXTENSION)
}

/// Numeric index of a resume file name, if it has one
pub fn resume_index(name: &str) -> Option<usize> {
    name.strip_prefix(RESUME_PREFIX)?
        .strip_suffix(RESUME_EXTENSION)?
        .parse()
        .ok()
}

pub struct InputManager {
    vacancy_path: PathBuf,
    resumes_dir: PathBuf,
}

impl InputManager {
    pub fn new(vacancy_path: PathBuf, resumes_dir: PathBuf) -> Self {
        Self {
            vacancy_path,
            resumes_dir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.vacancy_path(), config.resumes_dir())
    }

    pub fn vacancy_path(&self) -> &Path {
        &self.vacancy_path
    }

    pub fn resumes_dir(&self) -> &Path {
        &self.resumes_dir
    }

    /// Create the vacancy and resume directories if they are missing
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(parent) = self.vacancy_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::create_dir_all(&self.resumes_dir).await?;
        debug!("Resume directory: {}", self.resumes_dir.display());
        Ok(())
    }

    pub fn vacancy_exists(&self) -> bool {
        self.vacancy_path.is_file()
    }

    pub async fn read_vacancy(&self) -> Result<String> {
        if !self.vacancy_exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "Vacancy file does not exist: {}",
                self.vacancy_path.display()
            )));
        }
        info!("Reading vacancy from: {}", self.vacancy_path.display());
        read_text(&self.vacancy_path).await
    }

    /// Resume files in the resume directory, sorted by name
    pub async fn list_resumes(&self) -> Result<Vec<PathBuf>> {
        if !self.resumes_dir.is_dir() {
            return Err(ScreenerError::InvalidInput(format!(
                "Resume directory does not exist: {}",
                self.resumes_dir.display()
            )));
        }

        let mut resumes = Vec::new();
        let mut entries = fs::read_dir(&self.resumes_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if is_resume_file(&name.to_string_lossy()) && entry.file_type().await?.is_file() {
                resumes.push(entry.path());
            }
        }

        resumes.sort();
        Ok(resumes)
    }

    /// Index for the next generated resume, after the highest existing one
    pub async fn next_resume_index(&self) -> Result<usize> {
        let highest = self
            .list_resumes()
            .await?
            .iter()
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()).and_then(resume_index))
            .max()
            .unwrap_or(0);
        Ok(highest + 1)
    }
}

/// Read a UTF-8 text file
pub async fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).await.map_err(|e| {
        ScreenerError::InvalidInput(format!("Failed to read '{}': {}", path.display(), e))
    })
}
