use tracing::debug;

use crate::{HevraService, Result, degrade};
use hevra_domain::CompanySummary;

impl HevraService {
	/// Free-text company registry search. A blank query returns nothing.
	pub async fn search_companies(&self, query: &str) -> Result<Vec<CompanySummary>> {
		let query = query.trim();

		if query.is_empty() {
			return Ok(Vec::new());
		}

		let rows = self
			.registry_search
			.search_records(&self.cfg.resources.registry, query, self.cfg.limits.registry_max_records)
			.await;
		let rows = degrade("registry", query, rows)?.unwrap_or_default();
		let companies: Vec<CompanySummary> =
			rows.iter().filter_map(CompanySummary::from_record).collect();

		debug!(query, hits = companies.len(), "Registry search completed.");

		Ok(companies)
	}
}
