use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::{DatastoreSource, Error, Result, cache::TtlCache};
use hevra_config::DatastoreConfig;
use hevra_domain::ExternalRecord;
use hevra_providers::datastore::{DatastorePage, PageRequest};

/// Offset-paginated free-text search over one datastore, with a result cache.
pub struct SearchClient {
	source: Arc<dyn DatastoreSource>,
	cfg: DatastoreConfig,
	cache: TtlCache<Vec<ExternalRecord>>,
}
impl SearchClient {
	pub fn new(
		source: Arc<dyn DatastoreSource>,
		cfg: DatastoreConfig,
		cache: TtlCache<Vec<ExternalRecord>>,
	) -> Self {
		Self { source, cfg, cache }
	}

	pub fn cache(&self) -> &TtlCache<Vec<ExternalRecord>> {
		&self.cache
	}

	/// Up to `max_records` matches for `query`, fetched page by page.
	///
	/// Any page failure fails the whole call and nothing is cached.
	pub async fn search_records(
		&self,
		resource_id: &str,
		query: &str,
		max_records: u32,
	) -> Result<Vec<ExternalRecord>> {
		let resource_id = resource_id.trim();

		if resource_id.is_empty() {
			return Err(Error::Validation {
				message: "resource_id must be a non-empty string.".to_string(),
			});
		}
		if max_records == 0 {
			return Err(Error::Validation {
				message: "max_records must be greater than zero.".to_string(),
			});
		}

		let key = search_key(resource_id, query, max_records);

		if let Some(hit) = self.cache.get(&key) {
			debug!(resource_id, query, records = hit.len(), "Datastore search cache hit.");

			return Ok(hit);
		}

		let mut records: Vec<ExternalRecord> = Vec::new();
		let mut pages = 0_u32;

		loop {
			let fetched = records.len() as u32;
			let limit = self.cfg.page_size.min(max_records - fetched);
			let page = self
				.fetch_with_retry(PageRequest { resource_id, query, limit, offset: fetched })
				.await?;
			let received = page.records.len();

			pages += 1;
			records.extend(page.records);

			let fetched = records.len() as u64;
			let short_page = received < limit as usize;
			let total_reached = page.total.is_some_and(|total| fetched >= total);

			if received == 0 || short_page || total_reached || fetched >= u64::from(max_records) {
				break;
			}
		}

		records.truncate(max_records as usize);

		debug!(resource_id, query, pages, records = records.len(), "Datastore search completed.");

		self.cache.set(key, records.clone());

		Ok(records)
	}

	async fn fetch_with_retry(&self, req: PageRequest<'_>) -> Result<DatastorePage> {
		let max_attempts = self.cfg.max_attempts.max(1);
		let mut attempt = 1;

		loop {
			let result =
				match tokio::time::timeout(self.cfg.timeout(), self.source.fetch_page(&self.cfg, req))
					.await
				{
					Ok(result) => result,
					Err(_) => Err(hevra_providers::Error::Timeout { timeout_ms: self.cfg.timeout_ms }),
				};

			match result {
				Ok(page) => return Ok(page),
				Err(err) if attempt < max_attempts && err.is_transient() => {
					warn!(
						resource_id = req.resource_id,
						offset = req.offset,
						attempt,
						error = %err,
						"Datastore page request failed. Retrying."
					);

					tokio::time::sleep(Duration::from_millis(self.cfg.retry_backoff_ms)).await;

					attempt += 1;
				},
				Err(err) => return Err(err.into()),
			}
		}
	}
}

pub(crate) fn search_key(resource_id: &str, query: &str, max_records: u32) -> String {
	format!("search:{resource_id}:{query}:{max_records}")
}
