use clap::Args;
use miette::{miette, Result};

use super::{display_name, StackArgs};

#[derive(Args)]
pub struct FilesArgs {
    /// Only list the pack at this position in the search order
    #[arg(long, value_name = "POS")]
    position: Option<usize>,

    /// Log the stored names instead of printing decoded names
    #[arg(long, default_value_t = false)]
    raw: bool,

    #[command(flatten)]
    stack: StackArgs,
}

impl FilesArgs {
    pub fn handle(&self) -> Result<()> {
        let manager = self.stack.load()?;
        let legacy = self.stack.legacy_encoding()?;

        let archives = match self.position {
            Some(position) => vec![manager
                .get_archive_at(position)
                .ok_or(miette!("no pack at position {position}"))?],
            None => manager.iter().collect(),
        };

        for archive in archives {
            if self.raw {
                archive.list_files();
                continue;
            }
            for name in archive.entry_names() {
                println!("{}\t{}", archive.path(), display_name(name, legacy));
            }
        }
        Ok(())
    }
}
