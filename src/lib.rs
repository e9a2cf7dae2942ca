pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod hasher;
pub mod model;
pub mod progress;
pub mod reconcile;
pub mod report;
pub mod scanner;
pub mod utils;

pub use config::AppConfig;
pub use engine::{RunEngine, RunOptions, RunSummary};
pub use error::{Error, Result};
pub use hasher::ChecksumAlgorithm;
pub use model::{FileRecord, Operation, Patch, ReconcileResult, ScanResult};
pub use progress::{ProgressReporter, Side, SilentReporter};
