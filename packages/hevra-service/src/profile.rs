use serde::Serialize;

use crate::{HevraService, Result, company_number};
use hevra_domain::{ChangeRecord, InsolvencyCases, ProcedureCounts, TrusteeData};

/// Everything known about one company from all upstream sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
	pub company_id: String,
	pub trustee: TrusteeData,
	pub changes: Vec<ChangeRecord>,
	pub insolvency: InsolvencyCases,
	pub procedure_counts: ProcedureCounts,
}

impl HevraService {
	pub async fn get_company_profile(&self, company_id: &str) -> Result<CompanyProfile> {
		let company_id = company_number(company_id, "company_id")?;
		let (trustee, changes, insolvency) = tokio::join!(
			self.get_trustee_data(company_id),
			self.get_company_changes(company_id),
			self.get_insolvency_cases(company_id),
		);
		let trustee = trustee?;

		Ok(CompanyProfile {
			company_id: company_id.to_string(),
			procedure_counts: trustee.procedure_counts(),
			trustee,
			changes: changes?,
			insolvency: insolvency?,
		})
	}
}
