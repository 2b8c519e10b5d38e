//! Configuration for a [`crate::FileManager`]

use bon::Builder;
use encoding_rs::Encoding;

/// Options for how archives are opened and searched
///
/// ```
/// use lstg_pack::{FileManager, FileManagerOptions};
///
/// let manager = FileManager::with_options(
///     FileManagerOptions::builder()
///         .legacy_encoding(encoding_rs::GBK)
///         .build(),
/// );
/// assert_eq!(manager.count(), 0);
/// ```
#[derive(Debug, Clone, Copy, Builder)]
pub struct FileManagerOptions {
    /// The code page tried when a UTF-8 archive path or entry name does not match as given
    #[builder(default = encoding_rs::WINDOWS_1252)]
    pub legacy_encoding: &'static Encoding,
}

impl Default for FileManagerOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
