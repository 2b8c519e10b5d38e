pub mod extract;
pub mod files;
pub mod list;
pub mod resolve;

use clap::Args;
use encoding_rs::Encoding;
use lstg_pack::{FileManager, FileManagerOptions};
use miette::{miette, Result};
use std::{convert::Infallible, path::PathBuf, str::FromStr};
use tracing::info;
use walkdir::WalkDir;

#[derive(clap::Subcommand)]
pub enum PackCommands {
    /// Show the loaded packs in search order
    List(list::ListArgs),
    /// List the entries stored in a single pack
    Files(files::FilesArgs),
    /// Show which pack provides a file and which packs it overrides
    Resolve(resolve::ResolveArgs),
    /// Extract a file through the pack stack
    Extract(extract::ExtractArgs),
}

impl PackCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            PackCommands::List(list) => list.handle(),
            PackCommands::Files(files) => files.handle(),
            PackCommands::Resolve(resolve) => resolve.handle(),
            PackCommands::Extract(extract) => extract.handle(),
        }
    }
}

/// A pack on the command line, written as `path` or `path:priority`
#[derive(Debug, Clone, PartialEq)]
pub struct PackArg {
    pub path: String,
    pub priority: i32,
}

impl FromStr for PackArg {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Anything after the last ':' that isn't a number is part of the path (`C:\data.zip`).
        Ok(match s.rsplit_once(':') {
            Some((path, priority)) if !path.is_empty() => match priority.parse() {
                Ok(priority) => PackArg {
                    path: path.to_owned(),
                    priority,
                },
                Err(_) => PackArg {
                    path: s.to_owned(),
                    priority: 0,
                },
            },
            _ => PackArg {
                path: s.to_owned(),
                priority: 0,
            },
        })
    }
}

/// The packs to load and how to open them
#[derive(Args)]
pub struct StackArgs {
    /// A pack to load, optionally followed by `:priority`
    #[arg(short, long = "pack", value_name = "FILE[:PRIORITY]")]
    packs: Vec<PackArg>,

    /// Load every `.zip` below this directory with priority 0
    #[arg(short, long, value_name = "DIR")]
    directory: Vec<PathBuf>,

    /// Default password for every loaded pack
    #[arg(long)]
    password: Option<String>,

    /// Code page tried when a name doesn't match as UTF-8
    #[arg(long, value_name = "LABEL", default_value = "windows-1252")]
    legacy_encoding: String,
}

impl StackArgs {
    pub fn legacy_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.legacy_encoding.as_bytes())
            .ok_or(miette!("unknown encoding {}", self.legacy_encoding))
    }

    /// Create a manager holding every requested pack
    pub fn load(&self) -> Result<FileManager> {
        let mut manager = FileManager::with_options(
            FileManagerOptions::builder()
                .legacy_encoding(self.legacy_encoding()?)
                .build(),
        );

        for pack in &self.packs {
            manager.load_archive(&pack.path, pack.priority, self.password.as_deref())?;
        }

        for dir in &self.directory {
            let mut found = WalkDir::new(dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| !e.file_type().is_dir())
                .map(|e| e.into_path())
                .filter(|p| {
                    p.extension()
                        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
                })
                .collect::<Vec<_>>();
            found.sort();

            for path in found {
                let path = path
                    .to_str()
                    .ok_or(miette!("unable to convert {} to a string", path.display()))?;
                manager.load_archive(path, 0, self.password.as_deref())?;
            }
        }

        if manager.is_empty() {
            return Err(miette!("no packs were given"));
        }
        info!("loaded {} packs", manager.count());

        Ok(manager)
    }
}

/// Decode a stored entry name for display
pub fn display_name(raw: &[u8], legacy: &'static Encoding) -> String {
    match std::str::from_utf8(raw) {
        Ok(name) => name.to_owned(),
        Err(_) => legacy.decode_without_bom_handling(raw).0.into_owned(),
    }
}
