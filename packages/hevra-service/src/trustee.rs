//! Cross-dataset correlation: liquidation rows seed the bankruptcy and claims lookups.

use tracing::{debug, info};

use crate::{HevraService, Result, company_number, degrade};
use hevra_config::SeedMode;
use hevra_domain::{ExternalRecord, TrusteeData, assemble};

impl HevraService {
	/// Trustee and procedure aggregate for a company number.
	///
	/// Dataset failures degrade to empty contributions. A degraded aggregate is returned but
	/// not cached.
	pub async fn get_trustee_data(&self, company_id: &str) -> Result<TrusteeData> {
		let company_id = company_number(company_id, "company_id")?;
		let key = trustee_key(company_id);

		if let Some(hit) = self.trustee_cache.get(&key) {
			debug!(company_id, "Trustee aggregate cache hit.");

			return Ok(hit);
		}

		let resources = &self.cfg.resources;
		let mut degraded = false;
		let liquidation = self
			.insolvency_search
			.search_records(
				&resources.liquidation,
				company_id,
				self.cfg.limits.liquidation_max_records,
			)
			.await;
		let liquidation: Vec<ExternalRecord> = match degrade("liquidation", company_id, liquidation)? {
			Some(rows) =>
				rows.into_iter().filter(|raw| assemble::matches_company(raw, company_id)).collect(),
			None => {
				degraded = true;

				Vec::new()
			},
		};
		let file_ids = assemble::extract_file_ids(&liquidation);
		let (bankruptcy, claims) = if file_ids.is_empty() {
			(Vec::new(), Vec::new())
		} else {
			let seeds = match self.cfg.correlation.seed_mode() {
				SeedMode::First => &file_ids[..1],
				SeedMode::All => &file_ids[..],
			};
			let (bankruptcy, claims) = tokio::join!(
				self.search_seeded(&resources.bankruptcy, seeds),
				self.search_seeded(&resources.claims, seeds),
			);
			let bankruptcy = degrade("bankruptcy", company_id, bankruptcy)?;
			let claims = degrade("claims", company_id, claims)?;

			degraded |= bankruptcy.is_none() || claims.is_none();

			(
				assemble::retain_bankruptcy_files(bankruptcy.unwrap_or_default(), &file_ids),
				assemble::retain_claim_files(claims.unwrap_or_default(), &file_ids),
			)
		};
		let data = assemble::assemble(company_id, &liquidation, &bankruptcy, &claims);

		info!(
			company_id,
			liquidation = liquidation.len(),
			bankruptcy = bankruptcy.len(),
			claims = claims.len(),
			file_ids = file_ids.len(),
			trustees = data.trustees.len(),
			degraded,
			"Trustee aggregate assembled."
		);

		if !degraded {
			self.trustee_cache.set(key, data.clone());
		}

		Ok(data)
	}

	/// Searches `resource_id` once per seed file id and merges, dropping identical rows.
	async fn search_seeded(&self, resource_id: &str, seeds: &[String]) -> Result<Vec<ExternalRecord>> {
		let max_records = self.cfg.limits.secondary_max_records;
		let mut merged: Vec<ExternalRecord> = Vec::new();

		for seed in seeds {
			let rows = self.insolvency_search.search_records(resource_id, seed, max_records).await?;

			for row in rows {
				if !merged.contains(&row) {
					merged.push(row);
				}
			}
		}

		Ok(merged)
	}
}

pub(crate) fn trustee_key(company_id: &str) -> String {
	format!("trustee:{company_id}")
}
