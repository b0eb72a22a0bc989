mod tar;

use crate::runtime::Runtime;
use anyhow::Result;
use std::path::Path;

pub use self::tar::TarExtractor;

/// Trait for archive extractors
#[cfg_attr(test, mockall::automock)]
pub trait Extractor: Send + Sync {
    /// Check if this extractor can handle an artifact with the given name
    fn can_handle(&self, artifact_name: &str) -> bool;

    /// Extract the archive into the specified directory
    fn extract<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
    ) -> Result<()>;
}
