//! In-memory upstream fakes and a complete test configuration.

use std::{
	collections::{HashMap, HashSet},
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use serde_json::Value;

use hevra_config::{
	Cache, Config, Correlation, DatastoreConfig, InsolvencyConfig, Limits, Resources, Service,
	Upstream,
};
use hevra_domain::{ExternalRecord, record};
use hevra_providers::{
	datastore::{DatastorePage, PageRequest},
	insolvency::{self, CaseLookup},
};
use hevra_service::{BoxFuture, DatastoreSource, InsolvencySource, Sources};

pub const REGISTRY: &str = "res-registry";
pub const CHANGES: &str = "res-changes";
pub const LIQUIDATION: &str = "res-liquidation";
pub const BANKRUPTCY: &str = "res-bankruptcy";
pub const CLAIMS: &str = "res-claims";

pub fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			debug_logs: false,
		},
		upstream: Upstream {
			datastore: DatastoreConfig {
				api_base: "http://127.0.0.1:9".to_string(),
				path: "/api/3/action/datastore_search".to_string(),
				page_size: 100,
				timeout_ms: 1_000,
				max_attempts: 1,
				retry_backoff_ms: 10,
			},
			insolvency: InsolvencyConfig {
				url: "http://127.0.0.1:9/cases".to_string(),
				page_size: 200,
				timeout_ms: 1_000,
			},
		},
		resources: Resources {
			registry: REGISTRY.to_string(),
			changes: CHANGES.to_string(),
			liquidation: LIQUIDATION.to_string(),
			bankruptcy: BANKRUPTCY.to_string(),
			claims: CLAIMS.to_string(),
		},
		limits: Limits::default(),
		cache: Cache { enabled: true, registry_ttl_secs: 3_600, insolvency_ttl_secs: 86_400 },
		correlation: Correlation::default(),
	}
}

/// Object fixture from a `json!` literal. Non-objects become an empty record.
pub fn row(value: Value) -> ExternalRecord {
	match value {
		Value::Object(map) => map,
		_ => ExternalRecord::new(),
	}
}

/// Datastore fake: rows per resource, free-text matching on any field value.
#[derive(Default)]
pub struct FakeDatastore {
	resources: HashMap<String, Vec<ExternalRecord>>,
	report_total: bool,
	delay: Option<Duration>,
	failing: Mutex<HashSet<String>>,
	calls: Mutex<Vec<(String, String, u32, u32)>>,
}
impl FakeDatastore {
	pub fn new() -> Self {
		Self { report_total: true, ..Self::default() }
	}

	pub fn with_records(mut self, resource_id: &str, records: Vec<ExternalRecord>) -> Self {
		self.resources.entry(resource_id.to_string()).or_default().extend(records);

		self
	}

	/// Omit `total` from pages so pagination relies on short pages alone.
	pub fn without_total(mut self) -> Self {
		self.report_total = false;

		self
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);

		self
	}

	pub fn set_failing(&self, resource_id: &str, failing: bool) {
		let mut set = lock(&self.failing);

		if failing {
			set.insert(resource_id.to_string());
		} else {
			set.remove(resource_id);
		}
	}

	pub fn calls(&self, resource_id: &str) -> usize {
		lock(&self.calls).iter().filter(|(resource, ..)| resource == resource_id).count()
	}

	pub fn total_calls(&self) -> usize {
		lock(&self.calls).len()
	}

	/// `(query, limit, offset)` per page request against `resource_id`, in call order.
	pub fn requests(&self, resource_id: &str) -> Vec<(String, u32, u32)> {
		lock(&self.calls)
			.iter()
			.filter(|(resource, ..)| resource == resource_id)
			.map(|(_, query, limit, offset)| (query.clone(), *limit, *offset))
			.collect()
	}

	fn page(&self, req: PageRequest<'_>) -> hevra_providers::Result<DatastorePage> {
		lock(&self.calls).push((
			req.resource_id.to_string(),
			req.query.to_string(),
			req.limit,
			req.offset,
		));

		if lock(&self.failing).contains(req.resource_id) {
			return Err(hevra_providers::Error::Status {
				status: 503,
				body: "Service Unavailable".to_string(),
			});
		}

		let matching: Vec<&ExternalRecord> = self
			.resources
			.get(req.resource_id)
			.into_iter()
			.flatten()
			.filter(|raw| matches_query(raw, req.query))
			.collect();
		let records = matching
			.iter()
			.skip(req.offset as usize)
			.take(req.limit as usize)
			.map(|raw| (*raw).clone())
			.collect();

		Ok(DatastorePage {
			records,
			total: self.report_total.then_some(matching.len() as u64),
		})
	}
}
impl DatastoreSource for FakeDatastore {
	fn fetch_page<'a>(
		&'a self,
		_cfg: &'a DatastoreConfig,
		req: PageRequest<'a>,
	) -> BoxFuture<'a, hevra_providers::Result<DatastorePage>> {
		Box::pin(async move {
			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}

			self.page(req)
		})
	}
}

pub enum FakeCaseResponse {
	/// Raw API body, located with the same shape matchers as the HTTP client.
	Body(Value),
	NotFound,
	Fail,
}

/// Insolvency API fake. Unknown debtors answer "not found".
#[derive(Default)]
pub struct FakeInsolvency {
	responses: HashMap<String, FakeCaseResponse>,
	calls: Mutex<Vec<String>>,
}
impl FakeInsolvency {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_response(mut self, debtor_number: &str, response: FakeCaseResponse) -> Self {
		self.responses.insert(debtor_number.to_string(), response);

		self
	}

	pub fn calls(&self) -> usize {
		lock(&self.calls).len()
	}

	fn lookup(&self, debtor_number: &str) -> hevra_providers::Result<CaseLookup> {
		lock(&self.calls).push(debtor_number.to_string());

		match self.responses.get(debtor_number) {
			Some(FakeCaseResponse::Body(body)) =>
				insolvency::extract_case_array(body).map(CaseLookup::Found),
			Some(FakeCaseResponse::Fail) => Err(hevra_providers::Error::Status {
				status: 502,
				body: "Bad Gateway".to_string(),
			}),
			Some(FakeCaseResponse::NotFound) | None => Ok(CaseLookup::NotFound),
		}
	}
}
impl InsolvencySource for FakeInsolvency {
	fn fetch_cases<'a>(
		&'a self,
		_cfg: &'a InsolvencyConfig,
		debtor_number: &'a str,
	) -> BoxFuture<'a, hevra_providers::Result<CaseLookup>> {
		Box::pin(async move { self.lookup(debtor_number) })
	}
}

/// Wires both fakes into service sources, keeping handles for assertions.
pub fn sources(datastore: Arc<FakeDatastore>, insolvency: Arc<FakeInsolvency>) -> Sources {
	Sources { datastore, insolvency }
}

fn matches_query(raw: &ExternalRecord, query: &str) -> bool {
	let query = query.trim();

	query.is_empty()
		|| raw.values().any(|value| record::value_to_string(value).is_some_and(|s| s.contains(query)))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
