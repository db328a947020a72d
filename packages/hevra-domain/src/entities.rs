use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
	dates,
	fields::{changes, insolvency, office_holder, registry},
	record::{self, ExternalRecord},
};

/// One row of a company's registry change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
	pub date: String,
	#[serde(rename = "type")]
	pub change_type: String,
	pub details: String,
	pub company_name: String,
	pub request_code: String,
	pub security_id: Option<String>,
	#[serde(rename = "_raw")]
	pub raw: ExternalRecord,
}
impl ChangeRecord {
	pub fn from_record(raw: &ExternalRecord) -> Self {
		let date = record::field_string(raw, changes::DATE).unwrap_or_default();
		let change_type = record::field_string(raw, changes::TYPE).unwrap_or_default();
		let company_name = record::field_string(raw, changes::COMPANY_NAME).unwrap_or_default();
		let request_code = record::field_string(raw, changes::REQUEST_CODE).unwrap_or_default();
		let security_id = record::field_string(raw, changes::SECURITY_ID);
		let mut details = company_name.clone();

		if !request_code.is_empty() {
			if details.is_empty() {
				details = format!("קוד: {request_code}");
			} else {
				details.push_str(&format!(" (קוד: {request_code})"));
			}
		}
		if let Some(security_id) = &security_id {
			if !details.is_empty() {
				details.push_str(" | ");
			}

			details.push_str(&format!("מזהה שיעבוד: {security_id}"));
		}

		Self {
			date,
			change_type,
			details,
			company_name,
			request_code,
			security_id,
			raw: raw.clone(),
		}
	}
}

/// One hit from the company registry search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
	pub company_id: String,
	pub name: String,
	pub english_name: Option<String>,
	pub status: Option<String>,
	pub company_type: Option<String>,
	pub city: Option<String>,
	#[serde(rename = "_raw")]
	pub raw: ExternalRecord,
}
impl CompanySummary {
	/// `None` when the row carries no company number.
	pub fn from_record(raw: &ExternalRecord) -> Option<Self> {
		let company_id = record::field_string(raw, registry::COMPANY_ID)?;

		Some(Self {
			company_id,
			name: record::field_string(raw, registry::NAME).unwrap_or_default(),
			english_name: record::field_string(raw, registry::ENGLISH_NAME),
			status: record::field_string(raw, registry::STATUS),
			company_type: record::field_string(raw, registry::COMPANY_TYPE),
			city: record::field_string(raw, registry::CITY),
			raw: raw.clone(),
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureType {
	Bankruptcy,
	Liquidation,
	Claim,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalProcedure {
	#[serde(rename = "type")]
	pub procedure_type: ProcedureType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_number: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub opening_date: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub closing_date: Option<String>,
	pub status: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub approved_amount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub approved_regular_amount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub approved_priority_amount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub claimant: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub claimant_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub system_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub debt_creation_date: Option<String>,
	#[serde(rename = "_raw")]
	pub raw: ExternalRecord,
}
impl LegalProcedure {
	/// A procedure with no optional fields set.
	pub fn new(procedure_type: ProcedureType, status: String, raw: &ExternalRecord) -> Self {
		Self {
			procedure_type,
			file_number: None,
			opening_date: None,
			closing_date: None,
			status,
			amount: None,
			approved_amount: None,
			approved_regular_amount: None,
			approved_priority_amount: None,
			claimant: None,
			claimant_type: None,
			system_type: None,
			debt_creation_date: None,
			raw: raw.clone(),
		}
	}
}

/// An office holder (trustee, liquidator, receiver) named by a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrusteeInfo {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub appointment_date: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(rename = "_raw")]
	pub raw: ExternalRecord,
}
impl TrusteeInfo {
	pub fn from_record(raw: &ExternalRecord) -> Option<Self> {
		let name = record::field_string(raw, office_holder::NAME)?;

		Some(Self {
			name,
			phone: record::field_string(raw, office_holder::PHONE),
			email: record::field_string(raw, office_holder::EMAIL),
			appointment_date: record::field_string(raw, office_holder::APPOINTMENT_DATE),
			status: record::field_string(raw, office_holder::STATUS),
			raw: raw.clone(),
		})
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	pub order_type: String,
	pub date: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrusteeRef {
	pub name: String,
	pub appointment_date: Option<String>,
}

/// One proceeding from the justice ministry insolvency API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsolvencyCase {
	pub proceeding_id: String,
	pub debtor_name: String,
	pub status: String,
	#[serde(rename = "type")]
	pub case_type: String,
	pub opening_date: Option<String>,
	pub court_file_number: Option<String>,
	pub orders: Vec<Order>,
	pub trustees: Vec<TrusteeRef>,
	#[serde(rename = "_raw")]
	pub raw: ExternalRecord,
}
impl InsolvencyCase {
	pub fn from_record(raw: &ExternalRecord) -> Self {
		let orders = nested_objects(raw, insolvency::ORDERS)
			.map(|order| Order {
				order_type: record::field_string(order, insolvency::ORDER_TYPE).unwrap_or_default(),
				date: dates::normalize_date(record::normalize(order, insolvency::ORDER_DATE)),
				details: record::field_string(order, insolvency::ORDER_DETAILS),
			})
			.collect();
		let trustees = nested_objects(raw, insolvency::TRUSTEES)
			.map(|trustee| TrusteeRef {
				name: record::field_string(trustee, insolvency::TRUSTEE_NAME).unwrap_or_default(),
				appointment_date: dates::normalize_date(record::normalize(
					trustee,
					insolvency::TRUSTEE_APPOINTMENT_DATE,
				)),
			})
			.collect();

		Self {
			proceeding_id: record::field_string(raw, insolvency::PROCEEDING_ID)
				.unwrap_or_else(|| "0".to_string()),
			debtor_name: record::field_string(raw, insolvency::DEBTOR_NAME).unwrap_or_default(),
			status: record::field_string(raw, insolvency::STATUS).unwrap_or_default(),
			case_type: record::field_string(raw, insolvency::TYPE).unwrap_or_default(),
			opening_date: dates::normalize_date(record::normalize(raw, insolvency::OPENING_DATE)),
			court_file_number: record::field_string(raw, insolvency::COURT_FILE_NUMBER),
			orders,
			trustees,
			raw: raw.clone(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsolvencyCases {
	pub case_count: usize,
	pub cases: Vec<InsolvencyCase>,
}
impl InsolvencyCases {
	/// Maps raw cases and orders them newest first, undated last.
	pub fn from_records(records: &[ExternalRecord]) -> Self {
		let mut cases: Vec<InsolvencyCase> = records.iter().map(InsolvencyCase::from_record).collect();

		cases.sort_by_cached_key(|case| {
			std::cmp::Reverse(case.opening_date.as_deref().and_then(dates::parse_date))
		});

		Self { case_count: cases.len(), cases }
	}
}

fn nested_objects<'a>(
	raw: &'a ExternalRecord,
	variants: &[&str],
) -> impl Iterator<Item = &'a ExternalRecord> {
	record::normalize(raw, variants)
		.and_then(Value::as_array)
		.into_iter()
		.flatten()
		.filter_map(Value::as_object)
}
