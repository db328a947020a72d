use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read config {}: {source}", path.display())]
	ReadConfig { path: PathBuf, source: io::Error },
	#[error("Cannot parse config {}: {source}", path.display())]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("Environment variable {name} is invalid: {message}")]
	Env { name: String, message: String },
	#[error("Invalid config: {message}")]
	Validation { message: String },
}
