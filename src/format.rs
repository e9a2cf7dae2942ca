use crate::model::{FileRecord, Operation, Patch};
use std::fmt;

/// One rendered entry of a side's listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchLine<'a> {
    pub operation: Operation,
    pub record: &'a FileRecord,
}

impl fmt::Display for PatchLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.record)
    }
}

/// Flatten a patch into lines ordered by path. Unchanged lines are dropped
/// before sorting when `suppress_unchanged` is set.
pub fn patch_lines(patch: &Patch, suppress_unchanged: bool) -> Vec<PatchLine<'_>> {
    let mut lines: Vec<PatchLine<'_>> = Operation::ALL
        .into_iter()
        .filter(|operation| !(suppress_unchanged && *operation == Operation::Unchanged))
        .flat_map(|operation| {
            patch
                .records(operation)
                .iter()
                .map(move |record| PatchLine { operation, record })
        })
        .collect();

    // String ordering is bytewise
    lines.sort_by(|a, b| a.record.path.cmp(&b.record.path));
    lines
}

/// Render one side: the root label, then one line per entry, each newline
/// terminated.
pub fn format_patch(patch: &Patch, root_label: &str, suppress_unchanged: bool) -> String {
    let mut output = String::with_capacity(root_label.len() + 1);
    output.push_str(root_label);
    output.push('\n');

    for line in patch_lines(patch, suppress_unchanged) {
        output.push_str(&line.to_string());
        output.push('\n');
    }

    output
}
