//! The prioritized set of open archives
//!

use std::{
    cmp::{Ordering, Reverse},
    collections::BTreeMap,
};
use tracing::{debug, error, instrument, warn};

use crate::{
    archive::Archive,
    error::{Error, FileNotFoundError, Result},
    options::FileManagerOptions,
};

/// Position of an archive in the search order
///
/// Higher priorities come first, ties go to the archive that was loaded first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SearchKey {
    priority: i32,
    uid: u64,
}

impl SearchKey {
    fn of(archive: &Archive) -> Self {
        SearchKey {
            priority: archive.priority(),
            uid: archive.uid(),
        }
    }
}

impl Ord for SearchKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (Reverse(self.priority), self.uid).cmp(&(Reverse(other.priority), other.uid))
    }
}

impl PartialOrd for SearchKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Registry of open archives, kept in search order
///
/// ```no_run
/// use lstg_pack::FileManager;
///
/// fn load_texture(manager: &mut FileManager) -> lstg_pack::error::Result<Vec<u8>> {
///     manager.load_archive("data.zip", 0, None)?;
///     manager.load_archive("patch.zip", 10, None)?;
///
///     // patch.zip is searched before data.zip
///     manager.load_file("textures/player.png")
/// }
/// ```
#[derive(Debug, Default)]
pub struct FileManager {
    archives: BTreeMap<SearchKey, Archive>,
    next_uid: u64,
    options: FileManagerOptions,
}

impl FileManager {
    /// Create an empty manager with default options
    pub fn new() -> FileManager {
        FileManager::default()
    }

    /// Create an empty manager with the given options
    pub fn with_options(options: FileManagerOptions) -> FileManager {
        FileManager {
            archives: BTreeMap::new(),
            next_uid: 0,
            options,
        }
    }

    /// The options this manager opens archives with
    pub fn options(&self) -> &FileManagerOptions {
        &self.options
    }

    /// Open an archive and add it to the search order.
    ///
    /// Every call consumes a uid, including calls that fail to open the archive. On failure the
    /// set of loaded archives is left untouched.
    #[instrument(skip(self, password))]
    pub fn load_archive(
        &mut self,
        path: &str,
        priority: i32,
        password: Option<&str>,
    ) -> Result<()> {
        let uid = self.next_uid;
        self.next_uid += 1;

        let archive = match Archive::open(
            path,
            priority,
            password,
            uid,
            self.options.legacy_encoding,
        ) {
            Ok(archive) => archive,
            Err(err) => {
                error!("failed to load archive {path}: {err}");
                return Err(err);
            }
        };

        self.archives.insert(SearchKey::of(&archive), archive);
        debug!("archive {path} was loaded");
        Ok(())
    }

    /// The uid the next call to [`FileManager::load_archive`] will use
    pub fn next_uid(&self) -> u64 {
        self.next_uid
    }

    /// Get the first archive in search order that was opened with exactly `name`.
    pub fn get_archive(&self, name: &str) -> Option<&Archive> {
        let found = self.archives.values().find(|a| a.path() == name);
        if found.is_none() {
            error!("can't find archive {name}");
        }
        found
    }

    /// Mutable variant of [`FileManager::get_archive`], needed for extraction.
    pub fn get_archive_mut(&mut self, name: &str) -> Option<&mut Archive> {
        let found = self.archives.values_mut().find(|a| a.path() == name);
        if found.is_none() {
            error!("can't find archive {name}");
        }
        found
    }

    /// Get the archive at `position` in the current search order.
    ///
    /// Positions shift whenever archives are loaded or unloaded.
    pub fn get_archive_at(&self, position: usize) -> Option<&Archive> {
        self.archives.values().nth(position)
    }

    /// Mutable variant of [`FileManager::get_archive_at`], needed for extraction.
    pub fn get_archive_at_mut(&mut self, position: usize) -> Option<&mut Archive> {
        self.archives.values_mut().nth(position)
    }

    /// Whether an archive opened with exactly `name` is loaded
    pub fn exists(&self, name: &str) -> bool {
        self.archives.values().any(|a| a.path() == name)
    }

    /// Number of loaded archives
    pub fn count(&self) -> usize {
        self.archives.len()
    }

    /// Whether no archives are loaded
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Returns an iterator over the loaded archives in search order.
    pub fn iter(&self) -> impl Iterator<Item = &Archive> {
        self.archives.values()
    }

    /// Returns a mutable iterator over the loaded archives in search order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Archive> {
        self.archives.values_mut()
    }

    /// Remove and close the first archive in search order opened with exactly `name`.
    ///
    /// Unloading a name that isn't loaded is reported but changes nothing.
    #[instrument(skip(self))]
    pub fn unload_archive(&mut self, name: &str) -> Result<()> {
        let Some(key) = self
            .archives
            .iter()
            .find(|(_, a)| a.path() == name)
            .map(|(key, _)| *key)
        else {
            warn!("can't find archive {name}");
            return Err(Error::ArchiveNotFound(name.to_owned()));
        };

        self.archives.remove(&key);
        debug!("archive {name} was unloaded");
        Ok(())
    }

    /// Remove and close every archive.
    ///
    /// Uids are never handed out again, even after everything is unloaded.
    pub fn unload_all(&mut self) {
        while let Some((_, archive)) = self.archives.pop_first() {
            debug!("archive {} was unloaded", archive.path());
        }
    }

    /// Get the first archive in search order that contains `path`.
    pub fn find_archive(&self, path: &str) -> Option<&Archive> {
        self.archives.values().find(|a| a.exists(path))
    }

    /// Extract `path` from the first archive in search order that contains it.
    #[instrument(skip(self))]
    pub fn load_file(&mut self, path: &str) -> Result<Vec<u8>> {
        match self.archives.values_mut().find(|a| a.exists(path)) {
            Some(archive) => archive.load_file(path),
            None => Err(Error::FileNotFound(FileNotFoundError::Name(path.to_owned()))),
        }
    }
}

impl Drop for FileManager {
    fn drop(&mut self) {
        self.unload_all();
    }
}
