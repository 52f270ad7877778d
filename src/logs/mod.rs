//! Offline analysis of run log files

pub mod charts;
pub mod files;
pub mod parser;
pub mod report;

pub use files::{clean_old_logs, latest_log_file, list_log_files, LogFileInfo};
pub use parser::{LogData, LogParser};
pub use report::{write_report, ReportFiles};
