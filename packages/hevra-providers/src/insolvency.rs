//! Justice ministry insolvency proceedings API.

use std::time::Duration;

use reqwest::{Client, StatusCode, header::ACCEPT};
use serde_json::Value;

use crate::{Error, Result};
use hevra_config::InsolvencyConfig;
use hevra_domain::ExternalRecord;

/// Locates the case array inside one known response shape.
pub struct ShapeMatcher {
	pub name: &'static str,
	pub extract: fn(&Value) -> Option<&Vec<Value>>,
}

/// Response shapes the API has been seen to return, tried in order.
pub const CASE_ARRAY_MATCHERS: &[ShapeMatcher] = &[
	ShapeMatcher { name: "top_level_array", extract: Value::as_array },
	ShapeMatcher { name: "results", extract: results_field },
	ShapeMatcher { name: "data", extract: data_field },
	ShapeMatcher { name: "cases", extract: cases_field },
	ShapeMatcher { name: "first_array_field", extract: first_array_field },
];

#[derive(Debug, Clone, PartialEq)]
pub enum CaseLookup {
	Found(Vec<ExternalRecord>),
	/// The API answers 403 or 404 for debtors it has no proceedings for.
	NotFound,
}

pub async fn fetch_cases(cfg: &InsolvencyConfig, debtor_number: &str) -> Result<CaseLookup> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let body = serde_json::json!({
		"DebtorNumber": debtor_number,
		"page": 1,
		"pageSize": cfg.page_size,
	});
	let res = client
		.post(&cfg.url)
		.header(ACCEPT, "application/json")
		.json(&body)
		.send()
		.await
		.map_err(|err| Error::from_send(err, cfg.timeout_ms))?;
	let status = res.status();

	if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
		return Ok(CaseLookup::NotFound);
	}
	if !status.is_success() {
		return Err(Error::Status {
			status: status.as_u16(),
			body: crate::read_error_body(res).await,
		});
	}

	let json: Value = res.json().await.map_err(|err| Error::from_send(err, cfg.timeout_ms))?;

	extract_case_array(&json).map(CaseLookup::Found)
}

/// Case records from the first matching shape; non-object entries are skipped.
///
/// An object with no array anywhere means no cases. A JSON scalar is rejected.
pub fn extract_case_array(json: &Value) -> Result<Vec<ExternalRecord>> {
	if !json.is_array() && !json.is_object() {
		return Err(Error::InvalidResponse {
			message: "Insolvency response is neither a JSON array nor an object.".to_string(),
		});
	}

	let cases = CASE_ARRAY_MATCHERS
		.iter()
		.find_map(|matcher| (matcher.extract)(json))
		.map(|items| items.iter().filter_map(Value::as_object).cloned().collect())
		.unwrap_or_default();

	Ok(cases)
}

fn results_field(json: &Value) -> Option<&Vec<Value>> {
	json.get("results")?.as_array()
}

fn data_field(json: &Value) -> Option<&Vec<Value>> {
	json.get("data")?.as_array()
}

fn cases_field(json: &Value) -> Option<&Vec<Value>> {
	json.get("cases")?.as_array()
}

fn first_array_field(json: &Value) -> Option<&Vec<Value>> {
	json.as_object()?.values().find_map(Value::as_array)
}
