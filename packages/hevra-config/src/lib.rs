mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Cache, Config, Correlation, DatastoreConfig, InsolvencyConfig, Limits, Resources, SeedMode,
	Service, Upstream,
};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	apply_env(&mut cfg, |name| std::env::var(name).ok())?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

/// Applies `HEVRA_*` overrides on top of the file values.
///
/// `lookup` is `std::env::var` in production and a map in tests.
pub fn apply_env<F>(cfg: &mut Config, lookup: F) -> Result<()>
where
	F: Fn(&str) -> Option<String>,
{
	for (name, slot) in [
		("HEVRA_RESOURCE_REGISTRY", &mut cfg.resources.registry),
		("HEVRA_RESOURCE_CHANGES", &mut cfg.resources.changes),
		("HEVRA_RESOURCE_LIQUIDATION", &mut cfg.resources.liquidation),
		("HEVRA_RESOURCE_BANKRUPTCY", &mut cfg.resources.bankruptcy),
		("HEVRA_RESOURCE_CLAIMS", &mut cfg.resources.claims),
		("HEVRA_JUSTICE_API_URL", &mut cfg.upstream.insolvency.url),
		("HEVRA_LOG_LEVEL", &mut cfg.service.log_level),
	] {
		if let Some(value) = lookup(name) {
			*slot = value;
		}
	}

	if let Some(raw) = lookup("HEVRA_CACHE_ENABLED") {
		cfg.cache.enabled = parse_bool("HEVRA_CACHE_ENABLED", &raw)?;
	}
	if let Some(raw) = lookup("HEVRA_DEBUG_LOGS") {
		cfg.service.debug_logs = parse_bool("HEVRA_DEBUG_LOGS", &raw)?;
	}
	if let Some(raw) = lookup("HEVRA_CACHE_TTL_REGISTRY_SECS") {
		cfg.cache.registry_ttl_secs = parse_secs("HEVRA_CACHE_TTL_REGISTRY_SECS", &raw)?;
	}
	if let Some(raw) = lookup("HEVRA_CACHE_TTL_INSOLVENCY_SECS") {
		cfg.cache.insolvency_ttl_secs = parse_secs("HEVRA_CACHE_TTL_INSOLVENCY_SECS", &raw)?;
	}

	Ok(())
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	let admin_addr: SocketAddr = cfg.service.admin_bind.parse().map_err(|_| Error::Validation {
		message: "service.admin_bind must be a valid socket address.".to_string(),
	})?;

	if !admin_addr.ip().is_loopback() {
		return Err(Error::Validation {
			message: "service.admin_bind must be a loopback address.".to_string(),
		});
	}

	for (label, value) in [
		("resources.registry", &cfg.resources.registry),
		("resources.changes", &cfg.resources.changes),
		("resources.liquidation", &cfg.resources.liquidation),
		("resources.bankruptcy", &cfg.resources.bankruptcy),
		("resources.claims", &cfg.resources.claims),
		("upstream.datastore.api_base", &cfg.upstream.datastore.api_base),
		("upstream.insolvency.url", &cfg.upstream.insolvency.url),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.upstream.datastore.path.starts_with('/') {
		return Err(Error::Validation {
			message: "upstream.datastore.path must start with '/'.".to_string(),
		});
	}

	for (label, value) in [
		("upstream.datastore.page_size", u64::from(cfg.upstream.datastore.page_size)),
		("upstream.datastore.timeout_ms", cfg.upstream.datastore.timeout_ms),
		("upstream.datastore.max_attempts", u64::from(cfg.upstream.datastore.max_attempts)),
		("upstream.insolvency.page_size", u64::from(cfg.upstream.insolvency.page_size)),
		("upstream.insolvency.timeout_ms", cfg.upstream.insolvency.timeout_ms),
		("limits.registry_max_records", u64::from(cfg.limits.registry_max_records)),
		("limits.changes_max_records", u64::from(cfg.limits.changes_max_records)),
		("limits.liquidation_max_records", u64::from(cfg.limits.liquidation_max_records)),
		("limits.secondary_max_records", u64::from(cfg.limits.secondary_max_records)),
		("cache.registry_ttl_secs", cfg.cache.registry_ttl_secs),
		("cache.insolvency_ttl_secs", cfg.cache.insolvency_ttl_secs),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if !matches!(cfg.correlation.seed_mode.as_str(), "first" | "all") {
		return Err(Error::Validation {
			message: "correlation.seed_mode must be one of first or all.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for value in [
		&mut cfg.resources.registry,
		&mut cfg.resources.changes,
		&mut cfg.resources.liquidation,
		&mut cfg.resources.bankruptcy,
		&mut cfg.resources.claims,
		&mut cfg.upstream.insolvency.url,
	] {
		*value = value.trim().to_string();
	}

	cfg.upstream.datastore.api_base =
		cfg.upstream.datastore.api_base.trim().trim_end_matches('/').to_string();
	cfg.correlation.seed_mode = cfg.correlation.seed_mode.trim().to_ascii_lowercase();
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(Error::Env { name: name.to_string(), message: "expected a boolean.".to_string() }),
	}
}

fn parse_secs(name: &str, raw: &str) -> Result<u64> {
	raw.trim().parse().map_err(|_| Error::Env {
		name: name.to_string(),
		message: "expected a whole number of seconds.".to_string(),
	})
}
