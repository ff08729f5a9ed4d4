//! `cni-install binaries`: copy binaries into every writable target directory.

use anyhow::{Context, Result};
use clap::Args;

use cni_install_sync::{copy_binaries, TracingLog};

use super::SettingsArgs;

/// Arguments for `cni-install binaries`.
#[derive(Args, Debug)]
pub struct BinariesArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl BinariesArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.settings.resolve()?;
        let request = cfg.to_request();
        tracing::info!(
            "installing binaries from {} into {} target dir(s)",
            request.source_dir.display(),
            request.target_dirs.len(),
        );

        copy_binaries(&request, &TracingLog).with_context(|| {
            format!(
                "failed to install binaries from '{}'",
                request.source_dir.display()
            )
        })?;

        println!("✓ binaries installed");
        Ok(())
    }
}
