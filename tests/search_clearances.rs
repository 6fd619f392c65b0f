//! Execution tests for the paginated clearance search.
//!
//! Uses wiremock to mock the openFDA API and test the actual fetch loop:
//! termination, contiguous offsets, the result cap, and error surfacing.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openfda_510k::{ClearanceQuery, DeviceClearance, FdaClient, FdaError, List};

fn clearance(i: usize) -> Value {
    json!({
        "k_number": format!("K{i:06}"),
        "device_name": format!("Device {i}"),
        "applicant": "Acme Medical Inc.",
        "indications_for_use": "General use.",
        "summary_of_technology": "Summary."
    })
}

fn clearances(range: std::ops::RangeInclusive<usize>) -> Vec<Value> {
    range.map(clearance).collect()
}

fn search_response(records: Vec<Value>, skip: u64, limit: u32, total: u64) -> Value {
    json!({
        "meta": {
            "results": { "skip": skip, "limit": limit, "total": total }
        },
        "results": records,
    })
}

fn query() -> ClearanceQuery {
    ClearanceQuery::new("KJZ").unwrap()
}

#[tokio::test]
async fn test_single_short_page_issues_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("search", "product_code:KJZ"))
        .and(query_param("limit", "100"))
        .and(query_param("skip", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=40), 0, 100, 40)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 100, None)
        .await
        .unwrap();

    assert_eq!(records.len(), 40);
    assert_eq!(records[0].k_number, "K000001");
    assert_eq!(records[39].k_number, "K000040");
}

#[tokio::test]
async fn test_multiple_pages_are_contiguous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=2), 0, 2, 5)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(3..=4), 2, 2, 5)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(5..=5), 4, 2, 5)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 2, None)
        .await
        .unwrap();

    // All five records, in service order, no record repeated or skipped
    let numbers: Vec<&str> = records.iter().map(|r| r.k_number.as_str()).collect();
    assert_eq!(
        numbers,
        ["K000001", "K000002", "K000003", "K000004", "K000005"]
    );
}

#[tokio::test]
async fn test_reported_total_ends_loop_after_full_last_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=2), 0, 2, 4)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(3..=4), 2, 2, 4)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 2, None)
        .await
        .unwrap();

    // The second page is full, but the reported total stops a third request
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_limit_truncates_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=40), 0, 100, 40)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 100, Some(25))
        .await
        .unwrap();

    // Truncated to the first 25 in service-return order
    assert_eq!(records.len(), 25);
    assert_eq!(records[0].k_number, "K000001");
    assert_eq!(records[24].k_number, "K000025");
}

#[tokio::test]
async fn test_limit_stops_further_requests() {
    let mock_server = MockServer::start().await;

    // Only the first page is mounted; reaching the cap must prevent a
    // second request (which would 404 and fail the run).
    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .and(query_param("skip", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=2), 0, 2, 10)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 2, Some(2))
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_limit_above_match_count_returns_everything() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=3), 0, 100, 3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = openfda_510k::search_clearances(&client, &query(), 100, Some(50))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_zero_matches_is_empty_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(Vec::new(), 0, 100, 0)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 100, None)
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_not_found_code_maps_to_empty_result() {
    let mock_server = MockServer::start().await;

    // openFDA reports "no matches" as a 404 with a NOT_FOUND code
    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "NOT_FOUND", "message": "No matches found!" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 100, None)
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_plain_404_still_surfaces_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let result = DeviceClearance::list_all(&client, &query(), 100, None).await;

    match result {
        Err(FdaError::Api { status, code, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(code, None);
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_retried_then_surfaces() {
    let mock_server = MockServer::start().await;

    // 1 initial attempt + 3 retries
    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let result = DeviceClearance::list_all(&client, &query(), 100, None).await;

    match result {
        Err(FdaError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transient_server_error_recovers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=3), 0, 100, 3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let records = DeviceClearance::list_all(&client, &query(), 100, None)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_rate_limit_exhausts_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("slow down"),
        )
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let result = DeviceClearance::list_all(&client, &query(), 100, None).await;

    match result {
        Err(FdaError::RateLimited { retry_after_secs }) => {
            assert_eq!(retry_after_secs, Some(0));
        }
        other => panic!("Expected RateLimited error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_surfaces_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();
    let result = DeviceClearance::list_all(&client, &query(), 100, None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_streaming_stops_at_cap_mid_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/510k.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(clearances(1..=5), 0, 100, 5)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FdaClient::new(&mock_server.uri()).unwrap();

    let mut seen = Vec::new();
    let emitted = DeviceClearance::list_with(&client, &query(), 100, Some(3), |record| {
        seen.push(record.k_number);
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(emitted, 3);
    assert_eq!(seen, ["K000001", "K000002", "K000003"]);
}
