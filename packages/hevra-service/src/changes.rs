use std::cmp::Reverse;

use tracing::debug;

use crate::{Error, HevraService, Result, degrade};
use hevra_domain::{ChangeRecord, dates, fields, record};

impl HevraService {
	/// Registry change history for a company, newest first. Undated rows sort last.
	pub async fn get_company_changes(&self, company_number: &str) -> Result<Vec<ChangeRecord>> {
		let company_number = company_number.trim();

		if company_number.is_empty() {
			return Err(Error::Validation {
				message: "company_number must be a non-empty string.".to_string(),
			});
		}

		let rows = self
			.registry_search
			.search_records(
				&self.cfg.resources.changes,
				company_number,
				self.cfg.limits.changes_max_records,
			)
			.await;
		let Some(rows) = degrade("changes", company_number, rows)? else {
			return Ok(Vec::new());
		};
		let mut changes: Vec<ChangeRecord> = rows
			.iter()
			.filter(|raw| {
				record::field_string(raw, fields::changes::COMPANY_NUMBER).as_deref()
					== Some(company_number)
			})
			.map(ChangeRecord::from_record)
			.collect();

		changes.sort_by_cached_key(|change| Reverse(dates::parse_date(&change.date)));

		debug!(company_number, matched = changes.len(), searched = rows.len(), "Company changes loaded.");

		Ok(changes)
	}
}
