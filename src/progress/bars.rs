use super::{ProgressReporter, Side};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} [{prefix:.bold}] {wide_msg}";
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
const STEADY_TICK_MS: u64 = 80;

/// Terminal progress using one indicatif spinner per side while both trees
/// are scanned, then plain completion lines.
pub struct CliReporter {
    multi: MultiProgress,
    bar_a: Mutex<Option<ProgressBar>>,
    bar_b: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar_a: Mutex::new(None),
            bar_b: Mutex::new(None),
        }
    }

    fn slot(&self, side: Side) -> &Mutex<Option<ProgressBar>> {
        match side {
            Side::A => &self.bar_a,
            Side::B => &self.bar_b,
        }
    }

    fn new_spinner(&self, side: Side) -> ProgressBar {
        let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);

        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(style);
        pb.set_prefix(side.label());
        pb.enable_steady_tick(Duration::from_millis(STEADY_TICK_MS));
        pb
    }

    fn with_bar(&self, side: Side, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.slot(side).lock() {
            if let Some(pb) = slot.as_ref() {
                f(pb);
            }
        }
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, side: Side, root: &Path) {
        let pb = self.new_spinner(side);
        pb.set_message(format!("Scanning {}...", root.display()));
        if let Ok(mut slot) = self.slot(side).lock() {
            if let Some(old) = slot.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn on_scan_progress(&self, side: Side, files_hashed: usize) {
        self.with_bar(side, |pb| {
            pb.set_message(format!("Hashing... {} files", files_hashed));
        });
    }

    fn on_scan_complete(&self, side: Side, total_files: usize, duration_secs: f64) {
        if let Ok(mut slot) = self.slot(side).lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
        let _ = self.multi.println(format!(
            "  \x1b[32m✓\x1b[0m Scan {} complete: {} files in {:.2}s",
            side, total_files, duration_secs
        ));
    }

    fn on_reconcile_complete(&self, duration_secs: f64) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Reconcile complete in {:.2}s",
            duration_secs
        );
    }

    fn on_report_written(&self, path: &Path) {
        eprintln!("  \x1b[32m✓\x1b[0m Report written to {}", path.display());
    }
}
