//! Command-line pieces shared by the hevra binaries.

use std::path::PathBuf;

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `--config` flag, flattened into each binary's arguments.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
	/// TOML configuration file. `HEVRA_*` environment variables override its values.
	#[arg(long, short = 'c', value_name = "FILE", env = "HEVRA_CONFIG")]
	pub config: PathBuf,
}
impl ConfigArgs {
	pub fn load(&self) -> hevra_config::Result<hevra_config::Config> {
		hevra_config::load(&self.config)
	}
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
}
