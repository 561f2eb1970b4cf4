use httpmock::prelude::*;
use lmis_upload::config::toml_config::ApiConfig;
use lmis_upload::{
    FacilityLookupClient, Record, ResourceLocator, RestCommunicationClient, UniqueLookup,
    UploadError,
};

fn lookup_for(server: &MockServer, token: Option<&str>) -> FacilityLookupClient<RestCommunicationClient> {
    let config = ApiConfig {
        base_url: server.base_url(),
        access_token: token.map(str::to_string),
        timeout_seconds: Some(5),
    };
    FacilityLookupClient::new(RestCommunicationClient::new(&config).unwrap())
}

#[tokio::test]
async fn test_existing_facility_is_found_by_code() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/facilities")
            .query_param("code", "HC01")
            .header("Authorization", "Bearer test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "e6799d64", "code": "HC01", "name": "Comfort Health Clinic"}
            ]));
    });

    let lookup = lookup_for(&server, Some("test-token"));
    let record = Record::new()
        .with_field("code", "HC01")
        .with_field("name", "Comfort Health Clinic");

    let found = lookup.find_unique(&record).await.unwrap();

    api_mock.assert();
    assert_eq!(lookup.resource_path(), "/api/facilities");
    assert_eq!(found.unwrap()["id"], "e6799d64");
}

#[tokio::test]
async fn test_paged_search_response() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/facilities")
            .query_param("code", "HF02/A");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "content": [{"id": "a1", "code": "HF02/A"}],
                "totalElements": 1,
                "number": 0
            }));
    });

    let lookup = lookup_for(&server, None);
    let record = Record::new().with_field("code", "HF02/A");

    let found = lookup.find_unique(&record).await.unwrap();

    api_mock.assert();
    assert_eq!(found.unwrap()["id"], "a1");
}

#[tokio::test]
async fn test_empty_result_means_new_facility() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/facilities");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"content": [], "totalElements": 0}));
    });

    let lookup = lookup_for(&server, None);
    let record = Record::new().with_field("code", "NEW01");

    assert!(lookup.find_unique(&record).await.unwrap().is_none());
    api_mock.assert();
}

#[tokio::test]
async fn test_not_found_status_means_new_facility() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/facilities");
        then.status(404);
    });

    let lookup = lookup_for(&server, None);
    let record = Record::new().with_field("code", "NEW02");

    assert!(lookup.find_unique(&record).await.unwrap().is_none());
    api_mock.assert();
}

#[tokio::test]
async fn test_server_error_propagates() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/facilities");
        then.status(500);
    });

    let lookup = lookup_for(&server, None);
    let record = Record::new().with_field("code", "HC01");

    let err = lookup.find_unique(&record).await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, UploadError::ApiStatusError { status: 500, .. }));
}

#[tokio::test]
async fn test_missing_code_makes_no_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/facilities");
        then.status(200).json_body(serde_json::json!([]));
    });

    let lookup = lookup_for(&server, None);
    let record = Record::new().with_field("name", "Unnamed clinic");

    let err = lookup.find_unique(&record).await.unwrap_err();

    assert!(matches!(err, UploadError::MissingField { .. }));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_base_url_context_path_is_kept() {
    let server = MockServer::start();
    let prefixed_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/openlmis/api/facilities")
            .query_param("code", "HC01");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"id": "p1", "code": "HC01"}]));
    });
    let root_mock = server.mock(|when, then| {
        when.method(GET).path("/api/facilities");
        then.status(500);
    });

    let config = ApiConfig {
        base_url: server.url("/openlmis"),
        access_token: None,
        timeout_seconds: Some(5),
    };
    let lookup = FacilityLookupClient::new(RestCommunicationClient::new(&config).unwrap());
    let record = Record::new().with_field("code", "HC01");

    let found = lookup.find_unique(&record).await.unwrap();

    prefixed_mock.assert();
    root_mock.assert_hits(0);
    assert_eq!(found.unwrap()["id"], "p1");
}

#[tokio::test]
async fn test_loose_server_match_is_not_an_existing_facility() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/facilities");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"code": "HC010", "id": "x"}]));
    });

    let lookup = lookup_for(&server, None);

    let found = lookup
        .find_unique(&Record::new().with_field("code", "HC01"))
        .await
        .unwrap();
    assert!(found.is_none());
    api_mock.assert_hits(1);

    let err = lookup
        .find_unique(&Record::new().with_field("code", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::MissingField { .. }));
    api_mock.assert_hits(1);
}

#[test]
fn test_lookup_from_blocking_context() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/facilities")
            .query_param("code", "HC03");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "c3", "code": "HC03"}));
    });

    let lookup = lookup_for(&server, None);
    let record = Record::new().with_field("code", "HC03");

    let found = tokio_test::block_on(lookup.find_unique(&record)).unwrap();

    api_mock.assert();
    assert_eq!(found.unwrap()["code"], "HC03");
}
