//! Output: candidate report model and its console, JSON and Markdown renderings

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, OutputFormatter, ReportGenerator};
pub use report::CandidateReport;
