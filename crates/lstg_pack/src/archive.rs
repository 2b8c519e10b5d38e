//! Types for reading a single zip archive
//!

use encoding_rs::Encoding;
use indexmap::IndexMap;
use std::{
    fmt::{self, Debug},
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use tracing::{debug, error, info, instrument, trace};
use zip::{result::ZipResult, ZipArchive};

use crate::{
    encoding,
    error::{Error, FileNotFoundError, Result},
};

/// Size and protection of an entry, read from the central directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntryStat {
    size: u64,
    encrypted: bool,
}

/// A read-only zip archive with its search priority
///
/// The archive owns the open container for its whole lifetime and releases it when dropped.
/// Extraction needs exclusive access because the underlying reader is not reentrant.
///
/// ```no_run
/// fn dump(path: &str) -> lstg_pack::error::Result<()> {
///     let mut archive = lstg_pack::Archive::open(path, 0, None, 0, encoding_rs::WINDOWS_1252)?;
///
///     for index in 0..archive.entry_count() {
///         if let Some(name) = archive.entry_name(index) {
///             println!("{}", String::from_utf8_lossy(name));
///         }
///     }
///
///     let data = archive.load_file("data/config.json")?;
///     println!("{} bytes", data.len());
///
///     Ok(())
/// }
/// ```
pub struct Archive {
    path: String,
    zip: ZipArchive<File>,
    names: Vec<Option<Box<[u8]>>>,
    lookup: IndexMap<Box<[u8]>, usize>,
    password: Option<String>,
    priority: i32,
    uid: u64,
    legacy: &'static Encoding,
}

impl Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Archive")
            .field("path", &self.path)
            .field("priority", &self.priority)
            .field("uid", &self.uid)
            .field("entries", &self.names.len())
            .field("has_password", &self.password.is_some())
            .finish()
    }
}

impl Archive {
    /// Open the archive at `path` for reading.
    ///
    /// The path is tried as given first and then re-encoded into `legacy`. When a password is
    /// given it becomes the default for [`Archive::load_file`].
    ///
    /// Only Unix paths can carry legacy encoded bytes. Elsewhere a re-encoded path that isn't
    /// UTF-8 is rejected instead of being guessed at.
    #[instrument(skip(password, legacy))]
    pub fn open(
        path: &str,
        priority: i32,
        password: Option<&str>,
        uid: u64,
        legacy: &'static Encoding,
    ) -> Result<Archive> {
        if path.is_empty() {
            return Err(Error::BlankPath);
        }

        let mut zip = encoding::resolve(path, legacy, |candidate| -> ZipResult<ZipArchive<File>> {
            ZipArchive::new(File::open(candidate_path(candidate)?)?)
        })
        .map_err(|source| Error::ArchiveOpen {
            path: path.to_owned(),
            source,
        })?;

        let names: Vec<Option<Box<[u8]>>> = (0..zip.len())
            .map(|index| match zip.by_index_raw(index) {
                Ok(file) => Some(Box::from(file.name_raw())),
                Err(err) => {
                    debug!("no name for entry {index} in {path}: {err}");
                    None
                }
            })
            .collect();

        let mut lookup = IndexMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if let Some(name) = name {
                lookup.entry(name.clone()).or_insert(index);
            }
        }

        Ok(Archive {
            path: path.to_owned(),
            zip,
            names,
            lookup,
            password: password.map(str::to_owned),
            priority,
            uid,
            legacy,
        })
    }

    /// The path this archive was opened with
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Search priority, higher values are searched first
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Creation sequence number assigned by the owning manager
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Whether a default password was supplied when opening
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Get the index of an entry by its logical path, if it's present.
    ///
    /// The path is matched as given and then re-encoded into the legacy code page.
    pub fn file_precheck(&self, path: &str) -> Option<usize> {
        if path.is_empty() {
            return None;
        }
        encoding::resolve(path, self.legacy, |candidate| {
            self.lookup.get(candidate).copied().ok_or(())
        })
        .ok()
    }

    /// Whether the archive contains an entry for `path`
    pub fn exists(&self, path: &str) -> bool {
        self.file_precheck(path).is_some()
    }

    /// Number of entries contained in this archive.
    pub fn entry_count(&self) -> usize {
        self.names.len()
    }

    /// Get the stored name of an entry, in its raw byte representation.
    ///
    /// The encoding of this data is whatever the archive's creator used.
    pub fn entry_name(&self, index: usize) -> Option<&[u8]> {
        self.names.get(index)?.as_deref()
    }

    /// Returns an iterator over the raw names of every readable entry.
    pub fn entry_names(&self) -> impl Iterator<Item = &[u8]> {
        self.names.iter().filter_map(|name| name.as_deref())
    }

    /// Log the name of every entry
    pub fn list_files(&self) {
        for (index, name) in self.names.iter().enumerate() {
            match name {
                Some(name) => info!("{}", String::from_utf8_lossy(name)),
                None => error!("entry {index} in {} has no name", self.path),
            }
        }
    }

    /// Extract an entry into a new buffer using the archive's default password.
    #[instrument(skip(self), fields(archive = %self.path), err)]
    pub fn load_file(&mut self, path: &str) -> Result<Vec<u8>> {
        let index = self.precheck_or_not_found(path)?;
        self.extract(index, None)
    }

    /// Extract an entry into a new buffer using `password` instead of the default.
    #[instrument(skip(self, password), fields(archive = %self.path), err)]
    pub fn load_encrypted_file(&mut self, path: &str, password: &str) -> Result<Vec<u8>> {
        let index = self.precheck_or_not_found(path)?;
        self.extract(index, Some(password))
    }

    fn precheck_or_not_found(&self, path: &str) -> Result<usize> {
        self.file_precheck(path)
            .ok_or_else(|| Error::FileNotFound(FileNotFoundError::Name(path.to_owned())))
    }

    fn stat(&mut self, index: usize) -> Result<EntryStat> {
        let file = self
            .zip
            .by_index_raw(index)
            .map_err(|source| Error::Stat { index, source })?;

        Ok(EntryStat {
            size: file.size(),
            encrypted: file.encrypted(),
        })
    }

    fn extract(&mut self, index: usize, password: Option<&str>) -> Result<Vec<u8>> {
        let stat = self.stat(index)?;
        trace!("entry {index} is {stat:?}");

        let password = password
            .or(self.password.as_deref())
            .filter(|_| stat.encrypted);

        // The entry stream lives until the end of this function, on every path.
        let mut file = match password {
            Some(password) => self.zip.by_index_decrypt(index, password.as_bytes()),
            None => self.zip.by_index(index),
        }
        .map_err(|source| Error::OpenEntry { index, source })?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(usize::try_from(stat.size).unwrap_or(usize::MAX))
            .map_err(|source| Error::Allocation {
                index,
                size: stat.size,
                source,
            })?;

        let read = file
            .read_to_end(&mut buffer)
            .map_err(|source| Error::Read { index, source })? as u64;

        if read != stat.size {
            return Err(Error::ShortRead {
                index,
                expected: stat.size,
                actual: read,
            });
        }

        Ok(buffer)
    }
}

impl Drop for Archive {
    fn drop(&mut self) {
        trace!("releasing {}", self.path);
    }
}

#[cfg(unix)]
fn candidate_path(candidate: &[u8]) -> io::Result<PathBuf> {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    Ok(PathBuf::from(OsStr::from_bytes(candidate)))
}

#[cfg(not(unix))]
fn candidate_path(candidate: &[u8]) -> io::Result<PathBuf> {
    std::str::from_utf8(candidate)
        .map(PathBuf::from)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}
