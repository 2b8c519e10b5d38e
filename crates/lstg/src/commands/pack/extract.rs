use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::Write,
    path::PathBuf,
};
use tracing::info;

use super::StackArgs;

#[derive(Args)]
pub struct ExtractArgs {
    /// The logical path of the file
    path: String,

    /// Where to write the file, stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Password for this file, overriding the packs' default
    #[arg(long)]
    file_password: Option<String>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    #[command(flatten)]
    stack: StackArgs,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut manager = self.stack.load()?;

        let position = manager
            .iter()
            .position(|a| a.exists(&self.path))
            .ok_or(miette!("no pack contains {}", self.path))?;
        let archive = manager
            .get_archive_at_mut(position)
            .ok_or(miette!("no pack at position {position}"))?;
        info!("extracting {} from {}", self.path, archive.path());

        let data = match &self.file_password {
            Some(password) => archive.load_encrypted_file(&self.path, password),
            None => archive.load_file(&self.path),
        }
        .context(format!("extracting {}", self.path))?;

        match &self.output {
            Some(output) => {
                let mut out = if !self.overwrite {
                    File::create_new(output)
                        .into_diagnostic()
                        .context(format!("creating {}", output.display()))?
                } else {
                    File::create(output)
                        .into_diagnostic()
                        .context(format!("creating {}", output.display()))?
                };
                out.write_all(&data).into_diagnostic()?;
                info!("wrote {} bytes to {}", data.len(), output.display());
            }
            None => std::io::stdout().write_all(&data).into_diagnostic()?,
        }
        Ok(())
    }
}
