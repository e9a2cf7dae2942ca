//! Two-way reconciliation of scanned trees.
//!
//! Every path in the union of both scans is classified once per side:
//!
//! - addition: only the other side has it
//! - unchanged: both sides have it and the records are content-equal
//! - conflict: both sides have it and the records differ
//!
//! A path that exists only on this side is not part of this side's patch. It
//! shows up as an addition in the other side's patch instead.
//!
//! Every record in a side's patch is taken from the *other* scan, so side A's
//! patch describes what A must look like to match B, and the two patches
//! swap exactly when the inputs swap.

use crate::model::{FileRecord, Patch, ReconcileResult, ScanResult};
use ahash::AHashSet;

pub fn reconcile(scan_a: &ScanResult, scan_b: &ScanResult) -> ReconcileResult {
    let paths_a: AHashSet<&str> = scan_a.paths().collect();
    let paths_b: AHashSet<&str> = scan_b.paths().collect();

    let (unchanged, conflicts): (Vec<&str>, Vec<&str>) = paths_a
        .intersection(&paths_b)
        .copied()
        .partition(|path| match (scan_a.get(path), scan_b.get(path)) {
            (Some(a), Some(b)) => a.content_equal(b),
            _ => false,
        });

    ReconcileResult {
        side_a: build_patch(scan_b, &paths_b, &paths_a, &unchanged, &conflicts),
        side_b: build_patch(scan_a, &paths_a, &paths_b, &unchanged, &conflicts),
    }
}

/// Build the patch for one side; `other` is the scan its records come from.
fn build_patch(
    other: &ScanResult,
    other_paths: &AHashSet<&str>,
    own_paths: &AHashSet<&str>,
    unchanged: &[&str],
    conflicts: &[&str],
) -> Patch {
    let additions = other_paths.difference(own_paths).copied();

    Patch {
        additions: resolve(other, additions),
        unchanged: resolve(other, unchanged.iter().copied()),
        conflicts: resolve(other, conflicts.iter().copied()),
    }
}

/// Look up each path in `scan`, sorted by path so results are reproducible.
fn resolve<'a>(scan: &ScanResult, paths: impl Iterator<Item = &'a str>) -> Vec<FileRecord> {
    let mut records: Vec<FileRecord> = paths.filter_map(|path| scan.get(path).cloned()).collect();
    records.sort_by(|a, b| a.path.cmp(&b.path));
    records
}
