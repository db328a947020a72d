use tracing::{debug, info, warn};

use crate::{Error, HevraService, Result, company_number};
use hevra_domain::InsolvencyCases;
use hevra_providers::insolvency::CaseLookup;

impl HevraService {
	/// Proceedings the justice ministry API holds for a debtor.
	///
	/// "No cases" answers are cached; upstream failures read as no cases and are not.
	pub async fn get_insolvency_cases(&self, debtor_number: &str) -> Result<InsolvencyCases> {
		let debtor_number = company_number(debtor_number, "debtor_number")?;
		let key = cases_key(debtor_number);

		if let Some(hit) = self.case_cache.get(&key) {
			debug!(debtor_number, "Insolvency cases cache hit.");

			return Ok(hit);
		}

		let cfg = &self.cfg.upstream.insolvency;
		let lookup =
			match tokio::time::timeout(cfg.timeout(), self.sources.insolvency.fetch_cases(cfg, debtor_number))
				.await
			{
				Ok(result) => result.map_err(Error::from),
				Err(_) => Err(Error::Timeout { timeout_ms: cfg.timeout_ms }),
			};
		let cases = match lookup {
			Ok(CaseLookup::Found(records)) => InsolvencyCases::from_records(&records),
			Ok(CaseLookup::NotFound) => InsolvencyCases::default(),
			Err(err) => {
				warn!(debtor_number, error = %err, "Insolvency lookup failed. Returning no cases.");

				return Ok(InsolvencyCases::default());
			},
		};

		info!(debtor_number, cases = cases.case_count, "Insolvency cases loaded.");

		self.case_cache.set(key, cases.clone());

		Ok(cases)
	}
}

pub(crate) fn cases_key(debtor_number: &str) -> String {
	format!("insolvency:{debtor_number}")
}
