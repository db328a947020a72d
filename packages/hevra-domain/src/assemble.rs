//! Builds the trustee/insolvency aggregate from already-matched dataset rows.
//!
//! Everything here is pure so the "is this company in trouble" rule can be tested without
//! a network.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
	entities::{LegalProcedure, ProcedureType, TrusteeInfo},
	fields::{bankruptcy, claims, liquidation},
	record::{self, ExternalRecord, FieldVariants},
};

pub const UNKNOWN_COMPANY_NAME: &str = "לא ידוע";
pub const LIQUIDATION_DEFAULT_STATUS: &str = "בפירוק";
pub const BANKRUPTCY_DEFAULT_STATUS: &str = "פשיטת רגל";
pub const CLAIM_DEFAULT_STATUS: &str = "לא ידוע";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrusteeData {
	pub company_id: String,
	pub company_name: String,
	/// True when any procedure exists, even if no office holder could be named.
	pub has_trustee: bool,
	pub trustees: Vec<TrusteeInfo>,
	pub procedures: Vec<LegalProcedure>,
	pub related_companies: Vec<String>,
}
impl TrusteeData {
	pub fn empty(company_id: &str) -> Self {
		assemble(company_id, &[], &[], &[])
	}

	pub fn procedure_counts(&self) -> ProcedureCounts {
		let mut counts = ProcedureCounts::default();

		for procedure in &self.procedures {
			match procedure.procedure_type {
				ProcedureType::Liquidation => counts.liquidation += 1,
				ProcedureType::Bankruptcy => counts.bankruptcy += 1,
				ProcedureType::Claim => counts.claim += 1,
			}

			counts.total += 1;
		}

		counts
	}

	pub fn claims_totals(&self) -> ClaimsTotals {
		self.procedures
			.iter()
			.filter(|procedure| procedure.procedure_type == ProcedureType::Claim)
			.fold(ClaimsTotals::default(), |mut totals, claim| {
				totals.claimed += claim.amount.unwrap_or(0.0);
				totals.approved += claim.approved_amount.unwrap_or(0.0);

				totals
			})
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureCounts {
	pub liquidation: usize,
	pub bankruptcy: usize,
	pub claim: usize,
	pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsTotals {
	pub claimed: f64,
	pub approved: f64,
}

/// Liquidation rows whose company number equals `company_id` exactly.
///
/// Free-text search also returns rows that merely mention the number elsewhere.
pub fn matches_company(raw: &ExternalRecord, company_id: &str) -> bool {
	record::field_string(raw, liquidation::COMPANY_ID).is_some_and(|id| id == company_id.trim())
}

/// Distinct liquidation file ids in first-seen order.
pub fn extract_file_ids(liquidation_rows: &[ExternalRecord]) -> Vec<String> {
	let mut seen = HashSet::new();

	liquidation_rows
		.iter()
		.filter_map(|raw| record::field_string(raw, liquidation::FILE_ID))
		.filter(|id| seen.insert(id.clone()))
		.collect()
}

pub fn retain_bankruptcy_files(rows: Vec<ExternalRecord>, file_ids: &[String]) -> Vec<ExternalRecord> {
	retain_by_file_id(rows, bankruptcy::FILE_ID, file_ids)
}

pub fn retain_claim_files(rows: Vec<ExternalRecord>, file_ids: &[String]) -> Vec<ExternalRecord> {
	retain_by_file_id(rows, claims::FILE_ID, file_ids)
}

pub fn assemble(
	company_id: &str,
	liquidation_rows: &[ExternalRecord],
	bankruptcy_rows: &[ExternalRecord],
	claim_rows: &[ExternalRecord],
) -> TrusteeData {
	let mut trustees = TrusteeSet::default();
	let mut procedures = Vec::with_capacity(
		liquidation_rows.len() + bankruptcy_rows.len() + claim_rows.len(),
	);

	for raw in liquidation_rows {
		trustees.insert(raw);
		procedures.push(map_liquidation(raw));
	}
	for raw in bankruptcy_rows {
		trustees.insert(raw);
		procedures.push(map_bankruptcy(raw));
	}
	for raw in claim_rows {
		procedures.push(map_claim(raw));
	}

	let company_name = liquidation_rows
		.iter()
		.find_map(|raw| record::field_string(raw, liquidation::COMPANY_NAME))
		.unwrap_or_else(|| UNKNOWN_COMPANY_NAME.to_string());

	TrusteeData {
		company_id: company_id.trim().to_string(),
		company_name,
		has_trustee: !procedures.is_empty(),
		trustees: trustees.into_vec(),
		procedures,
		related_companies: Vec::new(),
	}
}

pub fn map_liquidation(raw: &ExternalRecord) -> LegalProcedure {
	let status = record::field_string(raw, liquidation::STATUS)
		.unwrap_or_else(|| LIQUIDATION_DEFAULT_STATUS.to_string());
	let mut procedure = LegalProcedure::new(ProcedureType::Liquidation, status, raw);

	procedure.file_number = record::field_string(raw, liquidation::FILE_ID);
	procedure.opening_date = record::field_string(raw, liquidation::OPENING_DATE);
	procedure.closing_date = record::field_string(raw, liquidation::CLOSING_DATE);

	procedure
}

pub fn map_bankruptcy(raw: &ExternalRecord) -> LegalProcedure {
	let status = record::field_string(raw, bankruptcy::STATUS)
		.unwrap_or_else(|| BANKRUPTCY_DEFAULT_STATUS.to_string());
	let mut procedure = LegalProcedure::new(ProcedureType::Bankruptcy, status, raw);

	procedure.file_number = record::field_string(raw, bankruptcy::FILE_ID);
	procedure.opening_date = record::field_string(raw, bankruptcy::OPENING_DATE);
	procedure.closing_date = record::field_string(raw, bankruptcy::CLOSING_DATE);

	procedure
}

pub fn map_claim(raw: &ExternalRecord) -> LegalProcedure {
	let status =
		record::field_string(raw, claims::STATUS).unwrap_or_else(|| CLAIM_DEFAULT_STATUS.to_string());
	let mut procedure = LegalProcedure::new(ProcedureType::Claim, status, raw);

	procedure.file_number = record::field_string(raw, claims::FILE_ID);
	procedure.claimant = record::field_string(raw, claims::CLAIMANT);
	procedure.claimant_type = record::field_string(raw, claims::CLAIMANT_TYPE);
	procedure.system_type = record::field_string(raw, claims::SYSTEM_TYPE);
	procedure.debt_creation_date = record::field_string(raw, claims::DEBT_CREATION_DATE);
	procedure.amount = Some(record::field_amount(raw, claims::AMOUNT));
	procedure.approved_amount = Some(record::field_amount(raw, claims::APPROVED_AMOUNT));
	procedure.approved_regular_amount =
		Some(record::field_amount(raw, claims::APPROVED_REGULAR_AMOUNT));
	procedure.approved_priority_amount =
		Some(record::field_amount(raw, claims::APPROVED_PRIORITY_AMOUNT));

	procedure
}

fn retain_by_file_id(
	rows: Vec<ExternalRecord>,
	variants: FieldVariants,
	file_ids: &[String],
) -> Vec<ExternalRecord> {
	let wanted: HashSet<&str> = file_ids.iter().map(String::as_str).collect();

	rows.into_iter()
		.filter(|raw| {
			record::field_string(raw, variants).is_some_and(|id| wanted.contains(id.as_str()))
		})
		.collect()
}

/// Office holders keyed by exact name; the first occurrence wins.
#[derive(Default)]
struct TrusteeSet {
	order: Vec<TrusteeInfo>,
	names: HashSet<String>,
}
impl TrusteeSet {
	fn insert(&mut self, raw: &ExternalRecord) {
		let Some(trustee) = TrusteeInfo::from_record(raw) else { return };

		if self.names.insert(trustee.name.clone()) {
			self.order.push(trustee);
		}
	}

	fn into_vec(self) -> Vec<TrusteeInfo> {
		self.order
	}
}
