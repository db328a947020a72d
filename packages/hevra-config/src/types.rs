use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub upstream: Upstream,
	pub resources: Resources,
	#[serde(default)]
	pub limits: Limits,
	pub cache: Cache,
	#[serde(default)]
	pub correlation: Correlation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
	/// Raises the hevra crates to debug level regardless of `log_level`.
	#[serde(default)]
	pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Upstream {
	pub datastore: DatastoreConfig,
	pub insolvency: InsolvencyConfig,
}

/// Tabular search API, e.g. `https://data.gov.il` + `/api/3/action/datastore_search`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreConfig {
	pub api_base: String,
	pub path: String,
	#[serde(default = "default_datastore_page_size")]
	pub page_size: u32,
	pub timeout_ms: u64,
	#[serde(default = "default_max_attempts")]
	pub max_attempts: u32,
	#[serde(default = "default_retry_backoff_ms")]
	pub retry_backoff_ms: u64,
}
impl DatastoreConfig {
	pub fn url(&self) -> String {
		format!("{}{}", self.api_base.trim_end_matches('/'), self.path)
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsolvencyConfig {
	pub url: String,
	#[serde(default = "default_insolvency_page_size")]
	pub page_size: u32,
	pub timeout_ms: u64,
}
impl InsolvencyConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

/// Datastore resource ids, one per dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Resources {
	pub registry: String,
	pub changes: String,
	pub liquidation: String,
	pub bankruptcy: String,
	pub claims: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
	pub registry_max_records: u32,
	pub changes_max_records: u32,
	pub liquidation_max_records: u32,
	pub secondary_max_records: u32,
}
impl Default for Limits {
	fn default() -> Self {
		Self {
			registry_max_records: 50,
			changes_max_records: 5_000,
			liquidation_max_records: 1_000,
			secondary_max_records: 5_000,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cache {
	pub enabled: bool,
	/// Registry search results and change history.
	pub registry_ttl_secs: u64,
	/// Liquidation, bankruptcy and claims datasets, justice API lookups and trustee
	/// aggregates.
	pub insolvency_ttl_secs: u64,
}
impl Cache {
	pub fn registry_ttl(&self) -> Duration {
		Duration::from_secs(self.registry_ttl_secs)
	}

	pub fn insolvency_ttl(&self) -> Duration {
		Duration::from_secs(self.insolvency_ttl_secs)
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Correlation {
	/// One of `first` or `all`.
	pub seed_mode: String,
}
impl Correlation {
	pub fn seed_mode(&self) -> SeedMode {
		match self.seed_mode.trim() {
			"first" => SeedMode::First,
			_ => SeedMode::All,
		}
	}
}
impl Default for Correlation {
	fn default() -> Self {
		Self { seed_mode: "all".to_string() }
	}
}

/// Which file ids seed the secondary dataset searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
	/// Search with the first extracted file id only.
	First,
	/// Search with every distinct file id and merge.
	All,
}

fn default_datastore_page_size() -> u32 {
	32_000
}

fn default_insolvency_page_size() -> u32 {
	200
}

fn default_max_attempts() -> u32 {
	1
}

fn default_retry_backoff_ms() -> u64 {
	500
}
