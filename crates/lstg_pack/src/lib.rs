//! This library stacks read-only **zip** archives into a prioritized virtual filesystem for
//! *LuaSTG* style games.
//!
//! # Overview
//!
//! Game assets are shipped in one or more zip archives. Later content (patches, mods, language
//! packs) overrides earlier content by being loaded with a higher priority. Scripts ask for files
//! by their logical path and never need to know which archive actually holds them.
//!
//! - [`Archive`] wraps one open zip container. It resolves logical paths to entries, extracts
//!   entries into owned buffers, optionally decrypting them with a default or per call password,
//!   and enumerates the stored names.
//! - [`FileManager`] owns every loaded [`Archive`] and keeps them in a fixed search order.
//!
//! ## Search order
//!
//! | Key      | Direction  | Meaning                                                  |
//! |----------|------------|----------------------------------------------------------|
//! | priority | descending | archives loaded with a higher priority are searched first |
//! | uid      | ascending  | among equal priorities the first loaded archive wins      |
//!
//! Every load attempt consumes a uid, successful or not, and uids are never reused for the life
//! of a [`FileManager`]. Positions returned by [`FileManager::get_archive_at`] are therefore only
//! meaningful until the next load or unload; use the archive path for a stable reference.
//!
//! ## Name encodings
//!
//! Archives built on older Windows machines store file names in the system code page rather than
//! UTF-8, and the archive files themselves may live under such names. Both opening an archive and
//! resolving an entry try the UTF-8 path first and then the same path re-encoded into the legacy
//! code page configured through [`FileManagerOptions`]. Names returned by
//! [`Archive::entry_name`] are the raw stored bytes.
//!
//! ## Additional Information
//!
//! - Archives are opened read only and are never modified.
//! - Extracted content is not cached; every extraction reads from the container.
//! - Encrypted entries use the traditional PKWARE (ZipCrypto) scheme.
//!

pub mod archive;
pub mod encoding;
pub mod error;
pub mod manager;
pub mod options;

pub use archive::Archive;
pub use manager::FileManager;
pub use options::FileManagerOptions;
