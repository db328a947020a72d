use std::{sync::Arc, time::Duration};

use serde_json::json;

use hevra_config::Config;
use hevra_domain::{ExternalRecord, ProcedureType};
use hevra_service::{Error, HevraService, SearchClient, TtlCache};
use hevra_testkit::{
	BANKRUPTCY, CHANGES, CLAIMS, FakeCaseResponse, FakeDatastore, FakeInsolvency, LIQUIDATION,
	REGISTRY, row, test_config,
};

const COMPANY: &str = "510000001";

fn service(
	cfg: Config,
	datastore: &Arc<FakeDatastore>,
	insolvency: &Arc<FakeInsolvency>,
) -> HevraService {
	HevraService::with_sources(cfg, hevra_testkit::sources(datastore.clone(), insolvency.clone()))
}

fn liquidation_row(file_id: &str, trustee: Option<&str>) -> ExternalRecord {
	let mut raw = row(json!({
		"מספר זיהוי של החברה": COMPANY,
		"שם החברה": "חברת בדיקה בע\"מ",
		"מזהה תיק פירוק חברה": file_id,
	}));

	if let Some(name) = trustee {
		raw.insert("שם בעל התפקיד".to_string(), json!(name));
	}

	raw
}

fn numbered_rows(count: usize) -> Vec<ExternalRecord> {
	(0..count).map(|i| row(json!({ "_id": i, "name": format!("row {i}") }))).collect()
}

fn search_client(datastore: &Arc<FakeDatastore>, page_size: u32) -> SearchClient {
	let mut cfg = test_config().upstream.datastore;

	cfg.page_size = page_size;

	SearchClient::new(datastore.clone(), cfg, TtlCache::new(Duration::from_secs(60), true))
}

#[tokio::test]
async fn unknown_company_has_no_trustee() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);
	let data = service.get_trustee_data("514736539").await.expect("Failed to load trustee data.");

	assert_eq!(data.company_id, "514736539");
	assert!(!data.has_trustee);
	assert!(data.trustees.is_empty());
	assert!(data.procedures.is_empty());
	assert_eq!(datastore.calls(LIQUIDATION), 1);
	assert_eq!(datastore.calls(BANKRUPTCY), 0, "No file ids means no secondary lookups.");
	assert_eq!(datastore.calls(CLAIMS), 0);
}

#[tokio::test]
async fn liquidation_and_claim_are_joined_by_file_id() {
	let datastore = Arc::new(
		FakeDatastore::new()
			.with_records(LIQUIDATION, vec![liquidation_row("12345", None)])
			.with_records(
				CLAIMS,
				vec![
					row(json!({ "מזהה תיק": "12345", "סכום תביעת החוב": 10000, "סכום שאושר": 8000 })),
					row(json!({ "מזהה תיק": "123456", "סכום תביעת החוב": 1 })),
				],
			),
	);
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);
	let data = service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	assert!(data.has_trustee);
	assert!(data.trustees.is_empty());
	assert_eq!(data.procedures.len(), 2);
	assert_eq!(data.procedures[0].procedure_type, ProcedureType::Liquidation);
	assert_eq!(data.procedures[1].procedure_type, ProcedureType::Claim);
	assert_eq!(data.procedures[1].amount, Some(10_000.0));
	assert_eq!(data.procedures[1].approved_amount, Some(8_000.0));
}

#[tokio::test]
async fn liquidation_rows_for_other_companies_are_ignored() {
	let mut other = liquidation_row("999", Some("עו\"ד אחר"));

	other.insert("מספר זיהוי של החברה".to_string(), json!("5100000019"));
	other.insert("הערות".to_string(), json!(format!("קשור ל-{COMPANY}")));

	let datastore = Arc::new(FakeDatastore::new().with_records(LIQUIDATION, vec![other]));
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);
	let data = service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	assert!(!data.has_trustee);
	assert_eq!(datastore.calls(BANKRUPTCY), 0);
}

#[tokio::test]
async fn bankruptcy_failure_degrades_and_is_not_cached() {
	let datastore = Arc::new(
		FakeDatastore::new()
			.with_records(LIQUIDATION, vec![liquidation_row("12345", Some("עו\"ד ישראלי"))])
			.with_records(BANKRUPTCY, vec![row(json!({ "מספר רץ תיקים": "12345" }))]),
	);
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);

	datastore.set_failing(BANKRUPTCY, true);

	let data = service.get_trustee_data(COMPANY).await.expect("Degraded lookup must not fail.");

	assert_eq!(data.procedures.len(), 1);
	assert_eq!(data.procedures[0].procedure_type, ProcedureType::Liquidation);
	assert_eq!(data.trustees[0].name, "עו\"ד ישראלי");
	assert!(service.cache_stats().trustee.keys.is_empty());

	datastore.set_failing(BANKRUPTCY, false);

	let data = service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	assert_eq!(data.procedures.len(), 2);
	assert_eq!(datastore.calls(BANKRUPTCY), 2);
	assert_eq!(service.cache_stats().trustee.keys, vec![format!("trustee:{COMPANY}")]);

	let calls = datastore.total_calls();
	let cached = service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	assert_eq!(cached, data);
	assert_eq!(datastore.total_calls(), calls);
}

#[tokio::test]
async fn liquidation_failure_yields_empty_aggregate() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);

	datastore.set_failing(LIQUIDATION, true);

	let data = service.get_trustee_data(COMPANY).await.expect("Degraded lookup must not fail.");

	assert!(!data.has_trustee);
	assert!(data.procedures.is_empty());
}

#[tokio::test]
async fn seed_mode_all_searches_every_file_id() {
	let datastore = Arc::new(
		FakeDatastore::new()
			.with_records(
				LIQUIDATION,
				vec![liquidation_row("100", Some("עו\"ד א")), liquidation_row("200", Some("עו\"ד א"))],
			)
			.with_records(
				BANKRUPTCY,
				vec![
					row(json!({ "מספר רץ תיקים": "100", "שם הנאמן": "עו\"ד ב" })),
					row(json!({ "מספר רץ תיקים": "200" })),
				],
			),
	);
	let insolvency = Arc::new(FakeInsolvency::new());
	let all = service(test_config(), &datastore, &insolvency)
		.get_trustee_data(COMPANY)
		.await
		.expect("Failed to load trustee data.");

	assert_eq!(all.procedure_counts().bankruptcy, 2);
	assert_eq!(all.trustees.len(), 2);
	assert_eq!(datastore.calls(BANKRUPTCY), 2);

	let mut cfg = test_config();

	cfg.correlation.seed_mode = "first".to_string();

	let first = service(cfg, &datastore, &insolvency)
		.get_trustee_data(COMPANY)
		.await
		.expect("Failed to load trustee data.");

	assert_eq!(first.procedure_counts().bankruptcy, 1);
	assert_eq!(first.procedure_counts().liquidation, 2);
}

#[tokio::test]
async fn identical_rows_from_several_seeds_are_merged_once() {
	let shared = row(json!({ "מזהה תיק": "100", "הערה": "גם 200", "סכום תביעת החוב": 5 }));
	let datastore = Arc::new(
		FakeDatastore::new()
			.with_records(LIQUIDATION, vec![liquidation_row("100", None), liquidation_row("200", None)])
			.with_records(CLAIMS, vec![shared]),
	);
	let insolvency = Arc::new(FakeInsolvency::new());
	let data = service(test_config(), &datastore, &insolvency)
		.get_trustee_data(COMPANY)
		.await
		.expect("Failed to load trustee data.");

	assert_eq!(data.procedure_counts().claim, 1);
	assert_eq!(data.claims_totals().claimed, 5.0);
}

#[tokio::test(start_paused = true)]
async fn search_cache_hits_within_ttl_and_refetches_after() {
	let datastore = Arc::new(FakeDatastore::new().with_records(REGISTRY, numbered_rows(3)));
	let client = search_client(&datastore, 100);
	let first = client.search_records(REGISTRY, "row", 10).await.expect("Failed to search.");
	let second = client.search_records(REGISTRY, "row", 10).await.expect("Failed to search.");

	assert_eq!(first, second);
	assert_eq!(datastore.calls(REGISTRY), 1);

	tokio::time::advance(Duration::from_secs(61)).await;

	client.search_records(REGISTRY, "row", 10).await.expect("Failed to search.");

	assert_eq!(datastore.calls(REGISTRY), 2);

	client.search_records(REGISTRY, "row 1", 10).await.expect("Failed to search.");

	assert_eq!(datastore.calls(REGISTRY), 3, "A different query is a different key.");
}

#[tokio::test]
async fn pagination_stops_on_short_page() {
	let datastore = Arc::new(FakeDatastore::new().without_total().with_records(REGISTRY, numbered_rows(5)));
	let records = search_client(&datastore, 2)
		.search_records(REGISTRY, "", 10)
		.await
		.expect("Failed to search.");

	assert_eq!(records.len(), 5);
	assert_eq!(
		datastore.requests(REGISTRY),
		vec![(String::new(), 2, 0), (String::new(), 2, 2), (String::new(), 2, 4)]
	);
}

#[tokio::test]
async fn pagination_stops_on_declared_total() {
	let datastore = Arc::new(FakeDatastore::new().with_records(REGISTRY, numbered_rows(4)));
	let records = search_client(&datastore, 2)
		.search_records(REGISTRY, "", 10)
		.await
		.expect("Failed to search.");

	assert_eq!(records.len(), 4);
	assert_eq!(datastore.calls(REGISTRY), 2);
}

#[tokio::test]
async fn pagination_stops_at_max_records() {
	let datastore = Arc::new(FakeDatastore::new().with_records(REGISTRY, numbered_rows(10)));
	let records = search_client(&datastore, 2)
		.search_records(REGISTRY, "", 3)
		.await
		.expect("Failed to search.");

	assert_eq!(records.len(), 3);
	assert_eq!(records[2]["_id"], 2);
	assert_eq!(
		datastore.requests(REGISTRY),
		vec![(String::new(), 2, 0), (String::new(), 1, 2)]
	);
}

#[tokio::test]
async fn search_rejects_bad_arguments_before_calling_upstream() {
	let datastore = Arc::new(FakeDatastore::new());
	let client = search_client(&datastore, 2);

	assert!(matches!(client.search_records(" ", "x", 10).await, Err(Error::Validation { .. })));
	assert!(matches!(client.search_records(REGISTRY, "x", 0).await, Err(Error::Validation { .. })));
	assert_eq!(datastore.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_up_to_max_attempts() {
	let datastore = Arc::new(FakeDatastore::new());
	let mut cfg = test_config().upstream.datastore;

	cfg.max_attempts = 3;

	let client =
		SearchClient::new(datastore.clone(), cfg, TtlCache::new(Duration::from_secs(60), true));

	datastore.set_failing(REGISTRY, true);

	let err = client.search_records(REGISTRY, "x", 10).await.expect_err("Expected failure.");

	assert!(matches!(err, Error::UpstreamUnavailable { .. }), "{err:?}");
	assert_eq!(datastore.calls(REGISTRY), 3);
	assert!(client.cache().stats().keys.is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_pages_time_out() {
	let datastore = Arc::new(
		FakeDatastore::new().with_delay(Duration::from_secs(5)).with_records(REGISTRY, numbered_rows(1)),
	);
	let err = search_client(&datastore, 10)
		.search_records(REGISTRY, "", 10)
		.await
		.expect_err("Expected a timeout.");

	assert!(matches!(err, Error::Timeout { timeout_ms: 1_000 }), "{err:?}");
}

#[tokio::test]
async fn non_numeric_debtor_is_rejected_before_any_call() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);

	for id in ["abc", "", "51-0000001", "  "] {
		let err = service.get_insolvency_cases(id).await.expect_err("Expected validation error.");

		assert!(err.is_validation(), "{err:?}");
	}

	assert!(service.get_trustee_data("12a").await.is_err());
	assert!(service.get_company_profile("x").await.is_err());
	assert_eq!(insolvency.calls(), 0);
	assert_eq!(datastore.total_calls(), 0);
}

#[tokio::test]
async fn http_sources_service_validates_before_any_request() {
	let service = HevraService::new(test_config());

	assert!(service.get_insolvency_cases("abc").await.expect_err("Expected error.").is_validation());
	assert!(service.get_trustee_data("").await.expect_err("Expected error.").is_validation());
	assert_eq!(service.cache_stats().insolvency_cases.entries, 0);
}

#[tokio::test]
async fn insolvency_not_found_is_cached_as_empty() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new().with_response(COMPANY, FakeCaseResponse::NotFound));
	let service = service(test_config(), &datastore, &insolvency);

	for _ in 0..2 {
		let cases = service.get_insolvency_cases(COMPANY).await.expect("Failed to load cases.");

		assert_eq!(cases.case_count, 0);
	}

	assert_eq!(insolvency.calls(), 1);
}

#[tokio::test]
async fn insolvency_failure_is_empty_and_not_cached() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new().with_response(COMPANY, FakeCaseResponse::Fail));
	let service = service(test_config(), &datastore, &insolvency);

	for _ in 0..2 {
		let cases = service.get_insolvency_cases(COMPANY).await.expect("Failed to load cases.");

		assert!(cases.cases.is_empty());
	}

	assert_eq!(insolvency.calls(), 2);
}

#[tokio::test]
async fn insolvency_cases_are_mapped_from_any_known_shape() {
	let body = json!({
		"total": 2,
		"data": [
			{ "ProceedingId": 11, "DebtorName": "חברה", "OpeningDate": "2018-01-01" },
			{ "ProceedingId": 12, "DebtorName": "חברה", "OpeningDate": "2020-05-05T00:00:00" }
		]
	});
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency =
		Arc::new(FakeInsolvency::new().with_response(COMPANY, FakeCaseResponse::Body(body)));
	let service = service(test_config(), &datastore, &insolvency);
	let cases = service.get_insolvency_cases(COMPANY).await.expect("Failed to load cases.");

	assert_eq!(cases.case_count, 2);
	assert_eq!(cases.cases[0].proceeding_id, "12");
	assert_eq!(cases.cases[0].opening_date.as_deref(), Some("2020-05-05T00:00:00Z"));
}

#[tokio::test]
async fn scalar_insolvency_body_degrades_to_no_cases() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(
		FakeInsolvency::new().with_response(COMPANY, FakeCaseResponse::Body(json!("maintenance"))),
	);
	let service = service(test_config(), &datastore, &insolvency);
	let cases = service.get_insolvency_cases(COMPANY).await.expect("Failed to load cases.");

	assert_eq!(cases.case_count, 0);
	assert!(service.cache_stats().insolvency_cases.keys.is_empty());
}

#[tokio::test]
async fn changes_are_filtered_and_sorted_newest_first() {
	let datastore = Arc::new(FakeDatastore::new().with_records(
		CHANGES,
		vec![
			row(json!({ "מספר תאגיד": COMPANY, "תאריך עדכון סטטוס": "2019-01-01", "סוג בקשה": "ישן" })),
			row(json!({ "מספר תאגיד": COMPANY, "סוג בקשה": "ללא תאריך" })),
			row(json!({ "מספר תאגיד": COMPANY, "תאריך עדכון סטטוס": "2023-06-01", "סוג בקשה": "חדש" })),
			row(json!({ "מספר תאגיד": "5100000012", "סוג בקשה": "אחר" })),
		],
	));
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);
	let changes = service.get_company_changes(COMPANY).await.expect("Failed to load changes.");
	let kinds: Vec<&str> = changes.iter().map(|c| c.change_type.as_str()).collect();

	assert_eq!(kinds, vec!["חדש", "ישן", "ללא תאריך"]);
	assert!(service.get_company_changes(" ").await.expect_err("Expected error.").is_validation());
}

#[tokio::test]
async fn changes_upstream_failure_reads_as_no_changes() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);

	datastore.set_failing(CHANGES, true);

	assert!(service.get_company_changes(COMPANY).await.expect("Failed to load changes.").is_empty());
}

#[tokio::test]
async fn registry_search_maps_hits_and_ignores_blank_queries() {
	let datastore = Arc::new(FakeDatastore::new().with_records(
		REGISTRY,
		vec![
			row(json!({ "מספר חברה": COMPANY, "שם חברה": "חברת בדיקה בע\"מ", "סטטוס חברה": "פעילה" })),
			row(json!({ "שם חברה": "חברת בדיקה ללא מספר" })),
		],
	));
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);

	assert!(service.search_companies("   ").await.expect("Failed to search.").is_empty());
	assert_eq!(datastore.total_calls(), 0);

	let hits = service.search_companies("בדיקה").await.expect("Failed to search.");

	assert_eq!(hits.len(), 1);
	assert_eq!(hits[0].company_id, COMPANY);
	assert_eq!(hits[0].status.as_deref(), Some("פעילה"));
}

#[tokio::test]
async fn profile_combines_all_sources() {
	let datastore = Arc::new(
		FakeDatastore::new()
			.with_records(LIQUIDATION, vec![liquidation_row("12345", Some("עו\"ד ישראלי"))])
			.with_records(
				CHANGES,
				vec![row(json!({ "מספר תאגיד": COMPANY, "סוג בקשה": "פירוק" }))],
			),
	);
	let insolvency = Arc::new(FakeInsolvency::new().with_response(
		COMPANY,
		FakeCaseResponse::Body(json!([{ "ProceedingId": 1 }])),
	));
	let service = service(test_config(), &datastore, &insolvency);
	let profile = service.get_company_profile(COMPANY).await.expect("Failed to load profile.");

	assert_eq!(profile.company_id, COMPANY);
	assert!(profile.trustee.has_trustee);
	assert_eq!(profile.changes.len(), 1);
	assert_eq!(profile.insolvency.case_count, 1);
	assert_eq!(profile.procedure_counts.liquidation, 1);
	assert_eq!(profile.procedure_counts.total, 1);
}

#[tokio::test]
async fn disabled_cache_always_calls_upstream() {
	let mut cfg = test_config();

	cfg.cache.enabled = false;

	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(cfg, &datastore, &insolvency);

	for _ in 0..2 {
		service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");
		service.get_insolvency_cases(COMPANY).await.expect("Failed to load cases.");
	}

	assert_eq!(datastore.calls(LIQUIDATION), 2);
	assert_eq!(insolvency.calls(), 2);
	assert_eq!(service.cache_stats().trustee.entries, 0);
}

#[tokio::test]
async fn clear_caches_forces_refetch() {
	let datastore = Arc::new(FakeDatastore::new());
	let insolvency = Arc::new(FakeInsolvency::new());
	let service = service(test_config(), &datastore, &insolvency);

	service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	let stats = service.cache_stats();

	assert_eq!(stats.trustee.entries, 1);
	assert_eq!(stats.insolvency_search.entries, 1);
	assert_eq!(service.clear_caches(Some(&format!("trustee:{COMPANY}"))), 1);

	service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	assert_eq!(datastore.calls(LIQUIDATION), 1, "Search cache still answers.");
	assert_eq!(service.clear_caches(None), 2);

	service.get_trustee_data(COMPANY).await.expect("Failed to load trustee data.");

	assert_eq!(datastore.calls(LIQUIDATION), 2);
}
