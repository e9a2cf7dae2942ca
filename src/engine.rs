use crate::config::AppConfig;
use crate::error::Result;
use crate::format::format_patch;
use crate::hasher::ChecksumAlgorithm;
use crate::model::PatchCounts;
use crate::progress::{ProgressReporter, Side};
use crate::reconcile::reconcile;
use crate::report::{render_report, write_report};
use crate::scanner::{scan_tree, ScanOptions};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What a single run compares and how.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root_a: PathBuf,
    pub root_b: PathBuf,
    pub algorithm: ChecksumAlgorithm,
    pub suppress_unchanged: bool,
}

pub struct RunEngine {
    config: AppConfig,
    options: RunOptions,
}

#[derive(Debug)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub output_path: PathBuf,
    pub scan_duration: Duration,
    pub reconcile_duration: Duration,
    pub write_duration: Duration,
    pub files_a: usize,
    pub files_b: usize,
    pub counts_a: PatchCounts,
    pub counts_b: PatchCounts,
}

impl RunEngine {
    pub fn new(config: AppConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run the whole pipeline:
    /// 1. Scan both roots concurrently
    /// 2. Reconcile the two scans into per-side patches
    /// 3. Render both patches and replace the report file
    ///
    /// Nothing is written unless both scans succeed.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary> {
        let started_at = Local::now();
        let output_path = PathBuf::from(&self.config.output_path);
        let scan_options = ScanOptions::from_config(&self.config, self.options.algorithm)?;

        info!(
            "Reconciling '{}' with '{}' using {}",
            self.options.root_a.display(),
            self.options.root_b.display(),
            self.options.algorithm,
        );

        // Phase 1: Scan
        let scan_start = Instant::now();
        let (scan_a, scan_b) = rayon::join(
            || scan_tree(&self.options.root_a, &scan_options, Side::A, reporter),
            || scan_tree(&self.options.root_b, &scan_options, Side::B, reporter),
        );
        let (scan_a, scan_b) = (scan_a?, scan_b?);
        let scan_duration = scan_start.elapsed();
        debug!(
            "Scans completed in {:.2}s, {} files in A, {} files in B",
            scan_duration.as_secs_f64(),
            scan_a.len(),
            scan_b.len(),
        );

        // Phase 2: Reconcile
        let reconcile_start = Instant::now();
        let result = reconcile(&scan_a, &scan_b);
        let reconcile_duration = reconcile_start.elapsed();
        reporter.on_reconcile_complete(reconcile_duration.as_secs_f64());

        // Phase 3: Report
        let write_start = Instant::now();
        let suppress = self.options.suppress_unchanged;
        let block_a = format_patch(
            &result.side_a,
            &self.options.root_a.display().to_string(),
            suppress,
        );
        let block_b = format_patch(
            &result.side_b,
            &self.options.root_b.display().to_string(),
            suppress,
        );
        let report = render_report(
            started_at,
            &self.options.root_a,
            &self.options.root_b,
            &block_a,
            &block_b,
        );
        write_report(&output_path, &report)?;
        let write_duration = write_start.elapsed();
        reporter.on_report_written(&output_path);
        info!("Patch written to {}", output_path.display());

        Ok(RunSummary {
            started_at,
            finished_at: Local::now(),
            output_path,
            scan_duration,
            reconcile_duration,
            write_duration,
            files_a: scan_a.len(),
            files_b: scan_b.len(),
            counts_a: result.side_a.counts(),
            counts_b: result.side_b.counts(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::progress::SilentReporter;
    use std::fs;
    use tempfile::TempDir;

    fn options(root_a: PathBuf, root_b: PathBuf) -> RunOptions {
        RunOptions {
            root_a,
            root_b,
            algorithm: ChecksumAlgorithm::Md5,
            suppress_unchanged: false,
        }
    }

    #[test]
    fn test_missing_root_leaves_existing_report_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let root_a = temp_dir.path().join("a");
        fs::create_dir(&root_a).unwrap();
        let report_path = temp_dir.path().join("reference.patch");
        fs::write(&report_path, "previous").unwrap();

        let config = AppConfig {
            output_path: report_path.to_string_lossy().into_owned(),
            ..AppConfig::default()
        };
        let engine = RunEngine::new(config, options(root_a, temp_dir.path().join("missing")));

        let err = engine.run(&SilentReporter).unwrap_err();
        assert!(matches!(err, Error::InvalidRoot(_)));
        assert_eq!(fs::read_to_string(&report_path).unwrap(), "previous");
    }

    #[test]
    fn test_summary_counts_match_patches() {
        let temp_dir = TempDir::new().unwrap();
        let root_a = temp_dir.path().join("a");
        let root_b = temp_dir.path().join("b");
        fs::create_dir(&root_a).unwrap();
        fs::create_dir(&root_b).unwrap();
        fs::write(root_a.join("only_a.txt"), "a").unwrap();
        fs::write(root_b.join("only_b.txt"), "b").unwrap();
        fs::write(root_b.join("also_b.txt"), "bb").unwrap();

        let config = AppConfig {
            output_path: temp_dir
                .path()
                .join("out.patch")
                .to_string_lossy()
                .into_owned(),
            ..AppConfig::default()
        };
        let summary = RunEngine::new(config, options(root_a, root_b))
            .run(&SilentReporter)
            .unwrap();

        assert_eq!(summary.files_a, 1);
        assert_eq!(summary.files_b, 2);
        assert_eq!(summary.counts_a.additions, 2);
        assert_eq!(summary.counts_b.additions, 1);
        assert_eq!(summary.counts_a.conflicts + summary.counts_b.conflicts, 0);
        assert!(summary.output_path.exists());
        assert!(summary.finished_at >= summary.started_at);
    }
}
