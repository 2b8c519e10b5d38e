use clap::Args;
use miette::Result;

use super::StackArgs;

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    stack: StackArgs,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let manager = self.stack.load()?;

        println!("{:>4} {:>8} {:>4} {:>8}  path", "pos", "priority", "uid", "entries");
        for (position, archive) in manager.iter().enumerate() {
            println!(
                "{:>4} {:>8} {:>4} {:>8}  {}",
                position,
                archive.priority(),
                archive.uid(),
                archive.entry_count(),
                archive.path()
            );
        }
        Ok(())
    }
}
