pub mod bars;

use std::fmt;
use std::path::Path;

pub use bars::CliReporter;

/// One of the two trees being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trait for reporting run progress.
///
/// Scan callbacks arrive concurrently from both scans and from the worker
/// pool inside each scan. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self, _side: Side, _root: &Path) {}
    fn on_scan_progress(&self, _side: Side, _files_hashed: usize) {}
    fn on_scan_complete(&self, _side: Side, _total_files: usize, _duration_secs: f64) {}
    fn on_reconcile_complete(&self, _duration_secs: f64) {}
    fn on_report_written(&self, _path: &Path) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
