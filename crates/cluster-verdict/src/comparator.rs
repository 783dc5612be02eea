//! Common interface over the remote and local comparators.

use crate::capture::Raster;
use crate::diff::LocalComparator;
use crate::remote::RemoteComparator;
use crate::types::{Verdict, VerdictResult};

/// Something that can judge an actual capture against a reference.
pub trait Comparator: Send + Sync {
    /// Short backend name for logs and reports.
    fn name(&self) -> &'static str;

    fn compare(&self, actual: &dyn Raster, reference: &dyn Raster) -> VerdictResult<Verdict>;
}

impl Comparator for RemoteComparator {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn compare(&self, actual: &dyn Raster, reference: &dyn Raster) -> VerdictResult<Verdict> {
        RemoteComparator::compare(self, actual, reference)
    }
}

impl Comparator for LocalComparator {
    fn name(&self) -> &'static str {
        "local"
    }

    fn compare(&self, actual: &dyn Raster, reference: &dyn Raster) -> VerdictResult<Verdict> {
        LocalComparator::compare(self, actual, reference)
    }
}
