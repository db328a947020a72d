//! CKAN-style `datastore_search` client.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use hevra_config::DatastoreConfig;
use hevra_domain::ExternalRecord;

/// One page of a free-text query against a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
	pub resource_id: &'a str,
	pub query: &'a str,
	pub limit: u32,
	pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatastorePage {
	pub records: Vec<ExternalRecord>,
	/// Total matches declared by the upstream, when it reports one.
	pub total: Option<u64>,
}

pub async fn fetch_page(cfg: &DatastoreConfig, req: PageRequest<'_>) -> Result<DatastorePage> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let limit = req.limit.to_string();
	let offset = req.offset.to_string();
	let res = client
		.get(cfg.url())
		.query(&[
			("resource_id", req.resource_id),
			("q", req.query),
			("limit", limit.as_str()),
			("offset", offset.as_str()),
		])
		.send()
		.await
		.map_err(|err| Error::from_send(err, cfg.timeout_ms))?;
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status {
			status: status.as_u16(),
			body: crate::read_error_body(res).await,
		});
	}

	let json: Value = res.json().await.map_err(|err| Error::from_send(err, cfg.timeout_ms))?;

	parse_datastore_response(json)
}

pub fn parse_datastore_response(json: Value) -> Result<DatastorePage> {
	if json.get("success").and_then(Value::as_bool) != Some(true) {
		let reason = json
			.pointer("/error/message")
			.and_then(Value::as_str)
			.unwrap_or("success flag is not true");

		return Err(Error::InvalidResponse {
			message: format!("Datastore search failed: {reason}."),
		});
	}

	let Some(result) = json.get("result") else {
		return Err(Error::InvalidResponse {
			message: "Datastore response is missing result.".to_string(),
		});
	};
	let Some(rows) = result.get("records").and_then(Value::as_array) else {
		return Err(Error::InvalidResponse {
			message: "Datastore response is missing result.records array.".to_string(),
		});
	};
	let mut records = Vec::with_capacity(rows.len());

	for row in rows {
		let Some(record) = row.as_object() else {
			return Err(Error::InvalidResponse {
				message: "Datastore record is not a JSON object.".to_string(),
			});
		};

		records.push(record.clone());
	}

	Ok(DatastorePage { records, total: result.get("total").and_then(Value::as_u64) })
}
