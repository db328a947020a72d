use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use hevra_domain::{ChangeRecord, CompanySummary, InsolvencyCase, TrusteeData};
use hevra_service::{CacheReport, CompanyProfile, Error};

#[derive(Debug, Deserialize)]
struct SearchQuery {
	#[serde(default)]
	q: String,
}

#[derive(Debug, Deserialize)]
struct ClearCacheQuery {
	key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangesResponse {
	success: bool,
	company_id: String,
	count: usize,
	changes: Vec<ChangeRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsolvencyResponse {
	success: bool,
	company_id: String,
	case_count: usize,
	cases: Vec<InsolvencyCase>,
}

#[derive(Debug, Serialize)]
struct ClearCacheResponse {
	cleared: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Validation { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			Error::Timeout { .. } =>
				ApiError::new(StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", err.to_string()),
			Error::UpstreamUnavailable { .. } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE", err.to_string()),
			Error::UpstreamShape { .. } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_SHAPE", err.to_string()),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			tracing::error!(error_code = %self.error_code, message = %self.message, "Request failed.");
		}

		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/companies/search", get(search_companies))
		.route("/v1/companies/{company_id}/changes", get(company_changes))
		.route("/v1/companies/{company_id}/insolvency", get(insolvency_cases))
		.route("/v1/companies/{company_id}/trustee", get(trustee_data))
		.route("/v1/companies/{company_id}/profile", get(company_profile))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/cache", get(cache_stats).delete(clear_cache))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_companies(
	State(state): State<AppState>,
	Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CompanySummary>>, ApiError> {
	let companies = state.service.search_companies(&query.q).await?;

	Ok(Json(companies))
}

async fn company_changes(
	State(state): State<AppState>,
	Path(company_id): Path<String>,
) -> Result<Json<ChangesResponse>, ApiError> {
	let changes = state.service.get_company_changes(&company_id).await?;

	Ok(Json(ChangesResponse {
		success: true,
		company_id: company_id.trim().to_string(),
		count: changes.len(),
		changes,
	}))
}

async fn insolvency_cases(
	State(state): State<AppState>,
	Path(company_id): Path<String>,
) -> Result<Json<InsolvencyResponse>, ApiError> {
	let result = state.service.get_insolvency_cases(&company_id).await?;

	Ok(Json(InsolvencyResponse {
		success: true,
		company_id: company_id.trim().to_string(),
		case_count: result.case_count,
		cases: result.cases,
	}))
}

async fn trustee_data(
	State(state): State<AppState>,
	Path(company_id): Path<String>,
) -> Result<Json<TrusteeData>, ApiError> {
	let data = state.service.get_trustee_data(&company_id).await?;

	Ok(Json(data))
}

async fn company_profile(
	State(state): State<AppState>,
	Path(company_id): Path<String>,
) -> Result<Json<CompanyProfile>, ApiError> {
	let profile = state.service.get_company_profile(&company_id).await?;

	Ok(Json(profile))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheReport> {
	Json(state.service.cache_stats())
}

async fn clear_cache(
	State(state): State<AppState>,
	Query(query): Query<ClearCacheQuery>,
) -> Json<ClearCacheResponse> {
	let cleared = state.service.clear_caches(query.key.as_deref());

	Json(ClearCacheResponse { cleared })
}
