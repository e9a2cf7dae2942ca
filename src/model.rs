use chrono::{DateTime, Duration, Local};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Display format for modification times in patch lines.
pub const MODIFIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scanned file, keyed by its path relative to the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub checksum: String,
    pub size: u64,
    pub modified_at: DateTime<Local>,
}

impl FileRecord {
    pub fn new(
        path: impl Into<String>,
        checksum: impl Into<String>,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        Self {
            path: path.into(),
            checksum: checksum.into(),
            size,
            modified_at: DateTime::<Local>::from(modified),
        }
    }

    /// Heuristic identity: checksum and size must match and the modification
    /// times must be less than one second apart.
    pub fn content_equal(&self, other: &FileRecord) -> bool {
        let delta = self.modified_at.signed_duration_since(other.modified_at);
        let tolerance = Duration::seconds(1);

        self.checksum == other.checksum
            && self.size == other.size
            && delta < tolerance
            && delta > -tolerance
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} | {} bytes)",
            self.path,
            self.modified_at.format(MODIFIED_AT_FORMAT),
            self.size
        )
    }
}

/// All files found under one root, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    root: PathBuf,
    files: HashMap<String, FileRecord>,
}

impl ScanResult {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: HashMap::new(),
        }
    }

    pub fn with_records<I>(root: impl Into<PathBuf>, records: I) -> Self
    where
        I: IntoIterator<Item = FileRecord>,
    {
        let mut scan = Self::new(root);
        for record in records {
            scan.insert(record);
        }
        scan
    }

    /// Insert a record, returning the previous one stored under the same path.
    pub fn insert(&mut self, record: FileRecord) -> Option<FileRecord> {
        self.files.insert(record.path.clone(), record)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.values().map(|record| record.size).sum()
    }
}

/// Classification of a path relative to one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// Present on the other side only.
    Addition,
    /// Present on both sides and content-equal.
    Unchanged,
    /// Present on both sides with differing content.
    Conflict,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Addition,
        Operation::Unchanged,
        Operation::Conflict,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Unchanged => '=',
            Operation::Conflict => '!',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Per-side result of reconciliation. Every record describes the file as it
/// exists on the other side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub additions: Vec<FileRecord>,
    pub unchanged: Vec<FileRecord>,
    pub conflicts: Vec<FileRecord>,
}

impl Patch {
    pub fn records(&self, operation: Operation) -> &[FileRecord] {
        match operation {
            Operation::Addition => &self.additions,
            Operation::Unchanged => &self.unchanged,
            Operation::Conflict => &self.conflicts,
        }
    }

    /// Operation recorded for `path`, if the path appears in this patch.
    pub fn operation_for(&self, path: &str) -> Option<Operation> {
        Operation::ALL
            .into_iter()
            .find(|op| self.records(*op).iter().any(|record| record.path == path))
    }

    pub fn counts(&self) -> PatchCounts {
        PatchCounts {
            additions: self.additions.len(),
            unchanged: self.unchanged.len(),
            conflicts: self.conflicts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.unchanged.is_empty() && self.conflicts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchCounts {
    pub additions: usize,
    pub unchanged: usize,
    pub conflicts: usize,
}

/// Both sides' patches from a single reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileResult {
    pub side_a: Patch,
    pub side_b: Patch,
}
