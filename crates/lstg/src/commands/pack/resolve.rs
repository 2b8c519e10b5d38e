use clap::Args;
use itertools::Itertools;
use miette::{miette, Result};
use owo_colors::OwoColorize;

use super::StackArgs;

#[derive(Args)]
pub struct ResolveArgs {
    /// The logical path of the file
    path: String,

    #[command(flatten)]
    stack: StackArgs,
}

impl ResolveArgs {
    pub fn handle(&self) -> Result<()> {
        let manager = self.stack.load()?;

        let mut providers = manager.iter().filter(|a| a.exists(&self.path));
        let winner = providers
            .next()
            .ok_or(miette!("no pack contains {}", self.path))?;

        println!(
            "✅ {} (priority {})",
            winner.path().green(),
            winner.priority()
        );

        let shadowed = providers
            .map(|a| format!("   {} (priority {})", a.path().dimmed(), a.priority()))
            .join("\n");
        if !shadowed.is_empty() {
            println!("overrides:\n{shadowed}");
        }
        Ok(())
    }
}
