// src/progress.rs
use std::path::Path;

use crate::error::AlterError;

/// Progress reporting for a batch run. Frontends implement this to surface
/// status to users.
pub trait Progress {
    /// Called at the start with the number of descriptors.
    fn begin(&mut self, _total: usize) {}

    /// A descriptor finished; `path` is the document written (or that would
    /// have been written, on a dry run).
    fn item_done(&mut self, _n: usize, _path: &Path) {}

    /// A descriptor failed and was skipped.
    fn item_failed(&mut self, _n: usize, _err: &AlterError) {}

    /// Called at the end.
    fn finish(&mut self) {}
}
