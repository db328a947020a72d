pub mod cache;
pub mod changes;
pub mod error;
pub mod insolvency;
pub mod profile;
pub mod registry;
pub mod search;
pub mod trustee;

pub use cache::{CacheStats, TtlCache};
pub use error::{Error, Result};
pub use profile::CompanyProfile;
pub use search::SearchClient;

use std::{future::Future, pin::Pin, sync::Arc};

use serde::Serialize;

use hevra_config::{Config, DatastoreConfig, InsolvencyConfig};
use hevra_domain::{InsolvencyCases, TrusteeData};
use hevra_providers::{
	datastore::{self, DatastorePage, PageRequest},
	insolvency::{self as insolvency_api, CaseLookup},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait DatastoreSource
where
	Self: Send + Sync,
{
	fn fetch_page<'a>(
		&'a self,
		cfg: &'a DatastoreConfig,
		req: PageRequest<'a>,
	) -> BoxFuture<'a, hevra_providers::Result<DatastorePage>>;
}

pub trait InsolvencySource
where
	Self: Send + Sync,
{
	fn fetch_cases<'a>(
		&'a self,
		cfg: &'a InsolvencyConfig,
		debtor_number: &'a str,
	) -> BoxFuture<'a, hevra_providers::Result<CaseLookup>>;
}

#[derive(Clone)]
pub struct Sources {
	pub datastore: Arc<dyn DatastoreSource>,
	pub insolvency: Arc<dyn InsolvencySource>,
}
impl Default for Sources {
	fn default() -> Self {
		Self { datastore: Arc::new(HttpSources), insolvency: Arc::new(HttpSources) }
	}
}

/// Cache contents per cache, for the admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
	pub registry_search: CacheStats,
	pub insolvency_search: CacheStats,
	pub trustee: CacheStats,
	pub insolvency_cases: CacheStats,
}

pub struct HevraService {
	pub cfg: Config,
	pub sources: Sources,
	/// Registry and change-history searches, registry TTL.
	pub(crate) registry_search: SearchClient,
	/// Liquidation, bankruptcy and claims searches, insolvency TTL.
	pub(crate) insolvency_search: SearchClient,
	pub(crate) trustee_cache: TtlCache<TrusteeData>,
	pub(crate) case_cache: TtlCache<InsolvencyCases>,
}
impl HevraService {
	pub fn new(cfg: Config) -> Self {
		Self::with_sources(cfg, Sources::default())
	}

	pub fn with_sources(cfg: Config, sources: Sources) -> Self {
		let enabled = cfg.cache.enabled;
		let registry_ttl = cfg.cache.registry_ttl();
		let insolvency_ttl = cfg.cache.insolvency_ttl();
		let registry_search = SearchClient::new(
			sources.datastore.clone(),
			cfg.upstream.datastore.clone(),
			TtlCache::new(registry_ttl, enabled),
		);
		let insolvency_search = SearchClient::new(
			sources.datastore.clone(),
			cfg.upstream.datastore.clone(),
			TtlCache::new(insolvency_ttl, enabled),
		);

		Self {
			cfg,
			sources,
			registry_search,
			insolvency_search,
			trustee_cache: TtlCache::new(insolvency_ttl, enabled),
			case_cache: TtlCache::new(insolvency_ttl, enabled),
		}
	}

	pub fn cache_stats(&self) -> CacheReport {
		CacheReport {
			registry_search: self.registry_search.cache().stats(),
			insolvency_search: self.insolvency_search.cache().stats(),
			trustee: self.trustee_cache.stats(),
			insolvency_cases: self.case_cache.stats(),
		}
	}

	/// Clears `key` from every cache, or all caches when `key` is `None`.
	pub fn clear_caches(&self, key: Option<&str>) -> usize {
		let removed = self.registry_search.cache().clear(key)
			+ self.insolvency_search.cache().clear(key)
			+ self.trustee_cache.clear(key)
			+ self.case_cache.clear(key);

		tracing::info!(key = key.unwrap_or("*"), removed, "Caches cleared.");

		removed
	}
}

struct HttpSources;
impl DatastoreSource for HttpSources {
	fn fetch_page<'a>(
		&'a self,
		cfg: &'a DatastoreConfig,
		req: PageRequest<'a>,
	) -> BoxFuture<'a, hevra_providers::Result<DatastorePage>> {
		Box::pin(datastore::fetch_page(cfg, req))
	}
}
impl InsolvencySource for HttpSources {
	fn fetch_cases<'a>(
		&'a self,
		cfg: &'a InsolvencyConfig,
		debtor_number: &'a str,
	) -> BoxFuture<'a, hevra_providers::Result<CaseLookup>> {
		Box::pin(insolvency_api::fetch_cases(cfg, debtor_number))
	}
}

/// Trimmed company or debtor number; must be ASCII digits only.
pub(crate) fn company_number<'a>(raw: &'a str, field: &str) -> Result<&'a str> {
	let trimmed = raw.trim();

	if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
		return Err(Error::Validation { message: format!("{field} must be a string of digits.") });
	}

	Ok(trimmed)
}

/// Empty contribution for a failed dataset; validation errors still surface.
pub(crate) fn degrade<T>(dataset: &str, key: &str, result: Result<T>) -> Result<Option<T>> {
	match result {
		Ok(value) => Ok(Some(value)),
		Err(err) if err.is_validation() => Err(err),
		Err(err) => {
			tracing::warn!(dataset, key, error = %err, "Dataset lookup failed. Continuing without it.");

			Ok(None)
		},
	}
}
