//! Listing, summarizing and pruning run log files

use crate::error::Result;
use crate::logging::LOG_FILE_EXTENSION;
use chrono::{DateTime, Local};
use log::{info, warn};
use std::path::{Path, PathBuf};

const LISTED_IN_INFO: usize = 5;

#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}

impl LogFileInfo {
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    pub fn modified_str(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// `*.log` files in `logs_dir`, newest first. A missing directory yields no files.
pub fn list_log_files(logs_dir: &Path) -> Result<Vec<LogFileInfo>> {
    if !logs_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(LOG_FILE_EXTENSION) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) => {
                warn!("Could not read metadata of {}: {}", path.display(), e);
                continue;
            }
        };

        files.push(LogFileInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            size_bytes: metadata.len(),
            modified: metadata.modified().map(DateTime::<Local>::from)?,
            path,
        });
    }

    // Names carry the start time, so they break mtime ties chronologically
    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
    Ok(files)
}

/// Most recent log file, if any
pub fn latest_log_file(logs_dir: &Path) -> Result<Option<PathBuf>> {
    Ok(list_log_files(logs_dir)?.into_iter().next().map(|f| f.path))
}

pub fn render_logs_info(logs_dir: &Path, files: &[LogFileInfo]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    out.push_str(&format!("{}\nLOGGING INFORMATION\n{}\n", rule, rule));
    out.push_str(&format!("\nLogs directory: {}\n", logs_dir.display()));

    if !logs_dir.is_dir() {
        out.push_str("The logs directory does not exist yet. It is created on the first run.\n");
        return out;
    }
    if files.is_empty() {
        out.push_str("No log files found.\n");
        return out;
    }

    let total: u64 = files.iter().map(|f| f.size_bytes).sum();
    out.push_str(&format!("Log files: {}\n", files.len()));
    out.push_str(&format!(
        "Total size: {:.2} KB ({:.2} MB)\n",
        total as f64 / 1024.0,
        total as f64 / (1024.0 * 1024.0)
    ));

    let latest = &files[0];
    out.push_str(&format!("\nLatest log file: {}\n", latest.name));
    out.push_str(&format!("  Modified: {}\n", latest.modified_str()));
    out.push_str(&format!("  Size: {:.2} KB\n", latest.size_kb()));

    out.push_str("\nAvailable log files (newest first):\n");
    for (i, file) in files.iter().take(LISTED_IN_INFO).enumerate() {
        out.push_str(&format!("{}. {} ({}, {:.2} KB)\n", i + 1, file.name, file.modified_str(), file.size_kb()));
    }
    if files.len() > LISTED_IN_INFO {
        out.push_str(&format!("... and {} more\n", files.len() - LISTED_IN_INFO));
    }

    out.push_str("\nTo analyze the latest log run: resume-screener logs report --latest\n");
    out.push_str(&format!("{}\n", rule));
    out
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub candidates: usize,
    pub deleted: usize,
}

/// Delete all but the `keep` newest log files
pub fn clean_old_logs(logs_dir: &Path, keep: usize) -> Result<CleanSummary> {
    let files = list_log_files(logs_dir)?;
    if files.len() <= keep {
        info!("No old log files to delete");
        return Ok(CleanSummary::default());
    }

    let old = &files[keep..];
    info!("Deleting {} old log files", old.len());

    let mut summary = CleanSummary {
        candidates: old.len(),
        deleted: 0,
    };
    for file in old {
        match std::fs::remove_file(&file.path) {
            Ok(()) => {
                info!("Deleted: {}", file.name);
                summary.deleted += 1;
            }
            Err(e) => warn!("Failed to delete {}: {}", file.path.display(), e),
        }
    }

    info!("Deleted {} of {} old log files", summary.deleted, summary.candidates);
    Ok(summary)
}
