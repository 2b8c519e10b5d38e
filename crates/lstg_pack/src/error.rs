//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// the archive path was empty
    #[error("archive path is blank")]
    BlankPath,

    /// neither the raw nor the legacy encoded path could be opened
    #[error("failed to open archive file {path}: {source}")]
    #[diagnostic(help("the path is tried as given and then re-encoded to the legacy code page"))]
    ArchiveOpen {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),

    /// metadata for the entry could not be read
    #[error("unable to stat entry {index}: {source}")]
    Stat {
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    /// the entry stream could not be opened, usually a wrong password or an unsupported method
    #[error("unable to open entry {index}: {source}")]
    OpenEntry {
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    /// the output buffer could not be allocated
    #[error("unable to allocate {size} bytes for entry {index}")]
    Allocation {
        index: usize,
        size: u64,
        #[source]
        source: std::collections::TryReserveError,
    },

    /// reading the entry stream failed part way through
    #[error("unable to read entry {index}: {source}")]
    Read {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// the entry produced a different number of bytes than its header claims
    #[error("entry {index} is corrupt: expected {expected} bytes, read {actual}")]
    ShortRead {
        index: usize,
        expected: u64,
        actual: u64,
    },

    /// unable to find requested archive
    #[error("can't find archive {0}")]
    ArchiveNotFound(String),
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
