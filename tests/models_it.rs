// crates.io
use serde_json::json;
// self
use trustar::models::{
	DistributionType, Enclave, EnclavePermissions, Indicator, IndicatorType, JsonModel, ModelError,
	NumberedPage, PriorityLevel, Report, RequestQuota, Tag,
};

const ENCLAVE_A: &str = "111e-222d-333c-444b-555a";
const ENCLAVE_B: &str = "115e-224d-333c-442b-551a";
const FIRST_SEEN: i64 = 494_035_200_000;
const LAST_SEEN: i64 = 1_601_942_400_000;

fn indicator_json() -> serde_json::Value {
	json!({
		"value": "8.8.8.8",
		"type": "IP",
		"priorityLevel": "HIGH",
		"correlationCount": 34,
		"whiteListed": false,
		"weight": 1,
		"reason": "Just because",
		"firstSeen": FIRST_SEEN,
		"lastSeen": LAST_SEEN,
		"sightings": 200,
		"source": "VirusTotal",
		"notes": "Nothing to see here.",
		"tags": [
			{ "name": "Bad Indicator BAD!!", "id": "Bad Indicator BAD!!", "enclaveId": ENCLAVE_A },
			{ "name": "Worse Indicator!", "id": "Worse Indicator!", "enclaveId": ENCLAVE_B },
		],
		"enclaveIds": [ENCLAVE_A, ENCLAVE_B],
	})
}

#[test]
fn indicator_fixture_survives_a_round_trip() {
	let indicator = Indicator::from_json(&indicator_json().to_string())
		.expect("Indicator fixture should parse.");

	assert_eq!(indicator.kind(), Some(IndicatorType::Ip));
	assert_eq!(indicator.priority(), Some(PriorityLevel::High));
	assert_eq!(indicator.first_seen, Some(FIRST_SEEN));
	assert_eq!(
		indicator.tags.as_deref().map(|tags| tags[1].clone()),
		Some(Tag::new("Worse Indicator!").with_id("Worse Indicator!").with_enclave_id(ENCLAVE_B))
	);
	assert_eq!(indicator.to_json_value().expect("Indicator should serialize."), indicator_json());
}

#[test]
fn page_of_indicators_reports_position() {
	let text = json!({
		"items": [indicator_json()],
		"pageNumber": 8,
		"pageSize": 10,
		"totalElements": 95,
	})
	.to_string();
	let page = NumberedPage::<Indicator>::from_json(&text).expect("Indicator page should parse.");

	assert_eq!(page.items().len(), 1);
	assert_eq!(page.total_pages(), Some(10));
	assert_eq!(page.has_more_pages(), Some(true));
	assert_eq!(page.clone().with_position(9, 10, 95).has_more_pages(), Some(false));
}

#[test]
fn nested_validation_failures_surface_from_pages() {
	let mut bad = indicator_json();

	bad["weight"] = json!(3);

	let text = json!({ "items": [indicator_json(), bad] }).to_string();
	let err = NumberedPage::<Indicator>::from_json(&text)
		.expect_err("A page holding weight 3 should be rejected.");

	assert!(matches!(err, ModelError::Invalid { model: "Indicator", field: "weight", .. }));
}

#[test]
fn report_normalizes_enclave_ids_and_time() {
	let report = Report::from_json(
		r#"{"id":"r-1","title":"t","enclaveIds":"e-1","isEnclave":true,"timeBegan":"2020-01-01T00:00:00Z"}"#,
	)
	.expect("Report should parse.");

	assert_eq!(report.enclave_ids.as_deref(), Some(&["e-1".to_owned()][..]));
	assert_eq!(report.distribution_type(), DistributionType::Enclave);
	assert_eq!(report.time_began_millis(), 1_577_836_800_000);
}

#[test]
fn enclave_permissions_keep_enclave_fields() {
	let permissions = EnclavePermissions::new(Enclave::new(ENCLAVE_A).with_name("Test Enclave Name"))
		.with_access(true, true, false);
	let value = permissions.to_json_value().expect("Permissions should serialize.");

	assert_eq!(
		value,
		json!({
			"id": ENCLAVE_A,
			"name": "Test Enclave Name",
			"read": true,
			"create": true,
			"update": false,
		})
	);
}

#[test]
fn quota_reports_remaining_requests() {
	let quota = RequestQuota::from_json(
		r#"{"guid":"q","maxRequests":1000,"usedRequests":250,"timeWindow":60000,"lastResetTime":0,"nextResetTime":60000}"#,
	)
	.expect("Quota should parse.");

	assert_eq!(quota.remaining_requests(), 750);
	assert!(!quota.is_exhausted());
}
