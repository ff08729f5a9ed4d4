//! Subcommands and the settings flags they share.

pub mod binaries;
pub mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cni_install_core::{BinaryName, InstallConfig};

/// Config file plus per-field overrides; flags win over file and environment.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// YAML config file. Missing fields keep their defaults.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the binaries to install.
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Target directory; repeat for several. Replaces the configured list.
    #[arg(long = "target", value_name = "DIR")]
    pub targets: Vec<PathBuf>,

    /// Overwrite binaries that are already installed.
    #[arg(long, overrides_with = "no_update")]
    pub update: bool,

    /// Leave already-installed binaries untouched.
    #[arg(long, overrides_with = "update")]
    pub no_update: bool,

    /// Binary name to skip; repeat or comma-separate. Replaces the configured list.
    #[arg(long = "skip", value_name = "NAME", value_delimiter = ',')]
    pub skips: Vec<String>,

    /// Prefix applied to every installed file name.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl SettingsArgs {
    /// Resolve defaults, config file, environment, then these flags.
    pub fn resolve(&self) -> Result<InstallConfig> {
        let mut cfg = InstallConfig::load_or_default(self.config.as_deref())
            .context("failed to load installer config")?;
        cfg.apply_env()
            .context("failed to apply environment overrides")?;
        self.apply_to(&mut cfg);
        Ok(cfg)
    }

    fn apply_to(&self, cfg: &mut InstallConfig) {
        if let Some(source) = &self.source {
            cfg.cni_bin_source_dir = source.clone();
        }
        if !self.targets.is_empty() {
            cfg.cni_bin_target_dirs = self.targets.clone();
        }
        if self.update {
            cfg.update_cni_binaries = true;
        } else if self.no_update {
            cfg.update_cni_binaries = false;
        }
        if !self.skips.is_empty() {
            cfg.skip_cni_binaries = self
                .skips
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(BinaryName::from)
                .collect();
        }
        if let Some(prefix) = &self.prefix {
            cfg.cni_binaries_prefix = prefix.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flags_change_nothing() {
        let mut cfg = InstallConfig::default();
        SettingsArgs::default().apply_to(&mut cfg);
        assert_eq!(cfg, InstallConfig::default());
    }

    #[test]
    fn flags_override_every_field() {
        let args = SettingsArgs {
            source: Some(PathBuf::from("/src")),
            targets: vec![PathBuf::from("/t")],
            no_update: true,
            skips: vec!["istio-iptables".into(), " ".into()],
            prefix: Some("v2-5-".into()),
            ..SettingsArgs::default()
        };
        let mut cfg = InstallConfig::default();
        args.apply_to(&mut cfg);

        assert_eq!(cfg.cni_bin_source_dir, PathBuf::from("/src"));
        assert_eq!(cfg.cni_bin_target_dirs, vec![PathBuf::from("/t")]);
        assert!(!cfg.update_cni_binaries);
        assert_eq!(cfg.skip_cni_binaries, vec!["istio-iptables"]);
        assert_eq!(cfg.cni_binaries_prefix, "v2-5-");
    }
}
