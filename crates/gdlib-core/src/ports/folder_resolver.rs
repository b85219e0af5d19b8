//! Folder resolver port definition.

use std::path::PathBuf;

/// Port for resolving the local save folder of a gallery URL.
///
/// Queried fresh on every render; results are never cached by the progress
/// component, so folder moves show up on the next update.
pub trait FolderResolver: Send + Sync {
    /// Resolve the save folder for `url`, or `None` when unmanaged.
    fn resolve_folder(&self, url: &str) -> Option<PathBuf>;
}

/// No-op resolver for contexts without managed folders (tests, headless).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopFolderResolver;

impl FolderResolver for NoopFolderResolver {
    fn resolve_folder(&self, _url: &str) -> Option<PathBuf> {
        None
    }
}
