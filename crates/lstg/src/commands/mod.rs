pub mod pack;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Inspect and extract from stacked resource packs
    Pack {
        #[command(subcommand)]
        command: pack::PackCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Pack { command } => command.handle(),
        }
    }
}
