//! Print or write the default settings file.

use clap::Args;
use dcblock_config::FilterSettings;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let settings = FilterSettings::default();
    match args.output {
        Some(path) => {
            settings.save(&path)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", settings.to_toml_string()?),
    }
    Ok(())
}
