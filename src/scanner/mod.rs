pub mod walk;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::hasher::{self, ChecksumAlgorithm};
use crate::model::{FileRecord, ScanResult};
use crate::progress::{ProgressReporter, Side};
use dashmap::DashMap;
use glob::Pattern;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info};

pub use walk::{collect_files, WalkedFile};

/// Everything a scan needs besides the root.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub algorithm: ChecksumAlgorithm,
    pub ignore_patterns: Vec<Pattern>,
    pub read_buffer_size: usize,
}

impl ScanOptions {
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        Self {
            algorithm,
            ignore_patterns: Vec::new(),
            read_buffer_size: hasher::DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn from_config(config: &AppConfig, algorithm: ChecksumAlgorithm) -> Result<Self> {
        let ignore_patterns = config
            .ignore_patterns
            .iter()
            .map(|glob| Pattern::new(glob))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            algorithm,
            ignore_patterns,
            read_buffer_size: config.read_buffer_size,
        })
    }
}

/// Scan one tree: walk it, then hash every file in parallel.
///
/// Walk errors only drop the offending entry. A file that was walked but
/// cannot be read while hashing fails the whole scan.
pub fn scan_tree(
    root: &Path,
    options: &ScanOptions,
    side: Side,
    reporter: &dyn ProgressReporter,
) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.to_path_buf()));
    }

    info!("Scanning {} ({})", root.display(), side);
    reporter.on_scan_start(side, root);
    let start = Instant::now();

    let walked = collect_files(root, &options.ignore_patterns);
    debug!("{} files found under {}", walked.len(), root.display());

    let scan = hash_walked(root, &walked, options, side, reporter)?;

    let duration = start.elapsed();
    debug!(
        "Scan of {} completed in {:.2}s, {} files, {} bytes",
        root.display(),
        duration.as_secs_f64(),
        scan.len(),
        scan.total_bytes(),
    );
    reporter.on_scan_complete(side, scan.len(), duration.as_secs_f64());

    Ok(scan)
}

/// Hash already-walked files in parallel into a [`ScanResult`] for `root`.
/// The first file that cannot be read fails the whole batch.
pub fn hash_walked(
    root: &Path,
    walked: &[WalkedFile],
    options: &ScanOptions,
    side: Side,
    reporter: &dyn ProgressReporter,
) -> Result<ScanResult> {
    // each key is written exactly once
    let records: DashMap<String, FileRecord> = DashMap::with_capacity(walked.len());
    let hashed = AtomicUsize::new(0);

    walked.par_iter().try_for_each(|file| {
        let checksum = hasher::hash_file(&file.path, options.algorithm, options.read_buffer_size)
            .map_err(|source| Error::FileRead {
                path: file.path.clone(),
                source,
            })?;

        records.insert(
            file.key.clone(),
            FileRecord::new(file.key.clone(), checksum, file.size, file.modified),
        );

        let count = hashed.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.on_scan_progress(side, count);
        Ok::<_, Error>(())
    })?;

    Ok(ScanResult::with_records(
        root,
        records.into_iter().map(|(_, record)| record),
    ))
}
