//! Console progress for exports.

use std::path::Path;

use crate::export::ExportPaths;

/// Progress callback for an export.
pub trait ExportProgress: Send {
    /// Called before any file is written.
    fn on_start(&self, output_dir: &Path);

    /// Called after each CSV file is written.
    fn on_file_written(&self, path: &Path, rows: usize);

    /// Called once all files are written.
    fn on_complete(&self, paths: &ExportPaths);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ExportProgress for StdoutProgress {
    fn on_start(&self, output_dir: &Path) {
        println!("Exporting dashboard data to {}...", output_dir.display());
    }

    fn on_file_written(&self, path: &Path, rows: usize) {
        println!("  wrote {} ({rows} rows)", path.display());
    }

    fn on_complete(&self, _paths: &ExportPaths) {
        println!("Export Complete.");
    }
}

/// Reporter that prints nothing.
pub struct SilentProgress;

impl ExportProgress for SilentProgress {
    fn on_start(&self, _output_dir: &Path) {}
    fn on_file_written(&self, _path: &Path, _rows: usize) {}
    fn on_complete(&self, _paths: &ExportPaths) {}
}
