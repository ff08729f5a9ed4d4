//! `cni-install config`: print the resolved installer configuration.

use anyhow::{Context, Result};
use clap::Args;

use super::SettingsArgs;

/// Arguments for `cni-install config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Emit machine-readable JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

impl ConfigArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.settings.resolve()?;
        if self.json {
            let json =
                serde_json::to_string_pretty(&cfg).context("failed to serialize config as JSON")?;
            println!("{json}");
        } else {
            print!("{}", cfg.to_yaml()?);
        }
        Ok(())
    }
}
