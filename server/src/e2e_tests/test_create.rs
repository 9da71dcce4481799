//! Test `POST /unicorns`.

use serde_json::json;

use crate::e2e_tests::helpers::{Method, TestServer};

#[test]
fn test_create_returns_created_record() {
    let server = TestServer::empty();
    let response = server.post(
        "/unicorns",
        &json!({
            "name": "Sparkle",
            "dob": "2012-06-30T10:15:00Z",
            "loves": "rainbows",
            "weight": "321.5",
            "vampires": "4",
            "gender": "Female"
        }),
    );

    assert_eq!(response.status, 201);
    let created = response.json();
    assert_eq!(created["name"], "Sparkle");
    assert_eq!(created["dob"], "2012-06-30T10:15:00.000Z");
    assert_eq!(created["loves"], json!(["rainbows"]));
    assert_eq!(created["weight"], json!(321.5));
    assert_eq!(created["vampires"], 4);
    assert_eq!(created["gender"], "f");
    assert_eq!(created["vaccinated"], true);
}

#[test]
fn test_create_then_get_any_case_returns_same_record() {
    let server = TestServer::empty();
    let created = server
        .post(
            "/unicorns",
            &json!({
                "name": "Glimmer",
                "dob": "2018-01-01",
                "loves": ["stars"],
                "weight": 280,
                "gender": "m",
                "vaccinated": false
            }),
        )
        .json();

    let fetched = server.get("/unicorns/gLiMmEr");
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.json(), created);
}

#[test]
fn test_create_missing_fields() {
    let server = TestServer::empty();
    let response = server.post("/unicorns", &json!({ "name": "Half", "weight": 10 }));
    assert_eq!(response.status, 400);
    assert_eq!(response.error(), "Missing required fields: dob, loves, gender");
    assert!(server.get("/unicorns").json().as_array().unwrap().is_empty());
}

#[test]
fn test_create_unparseable_values() {
    let server = TestServer::empty();
    let response = server.post(
        "/unicorns",
        &json!({
            "name": "Odd",
            "dob": "someday",
            "loves": ["x"],
            "weight": 10,
            "gender": "m"
        }),
    );
    assert_eq!(response.status, 400);
    assert!(response.error().starts_with("Invalid value for dob"));
}

#[test]
fn test_create_duplicate_name_conflicts_and_changes_nothing() {
    let server = TestServer::new();
    let before = server.get("/unicorns").json();

    let response = server.post(
        "/unicorns",
        &json!({
            "name": "AURORA",
            "dob": "2000-01-01",
            "loves": ["x"],
            "weight": 1,
            "gender": "f"
        }),
    );
    assert_eq!(response.status, 409);
    assert_eq!(response.error(), "Unicorn with this name already exists");
    assert_eq!(server.get("/unicorns").json(), before);
}

#[test]
fn test_create_rejects_non_json_body() {
    let server = TestServer::empty();
    let response = server.request(Method::POST, "/unicorns", Some("not json"));
    assert_eq!(response.status, 400);
    assert_eq!(response.error(), "Invalid data format");
}

#[test]
fn test_created_record_is_appended_last() {
    let server = TestServer::new();
    server.post(
        "/unicorns",
        &json!({
            "name": "Zed",
            "dob": "2000-01-01",
            "loves": ["x"],
            "weight": 1,
            "gender": "m"
        }),
    );
    let names = server.search_names("");
    assert_eq!(names.len(), 13);
    assert_eq!(names.last().map(String::as_str), Some("Zed"));
}

#[test]
fn test_ids_are_unique() {
    let server = TestServer::new();
    let records = server.get("/unicorns").json();
    let mut ids: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["_id"].as_str().unwrap())
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_create_with_padded_name_is_reachable_by_same_name() {
    let server = TestServer::empty();
    let created = server.post(
        "/unicorns",
        &json!({
            "name": " Lucky ",
            "dob": "2015-05-05",
            "loves": "clover",
            "weight": 500,
            "gender": "m"
        }),
    );
    assert_eq!(created.status, 201);
    assert_eq!(created.json()["name"], "Lucky");

    let found = server.get("/unicorns/%20Lucky%20");
    assert_eq!(found.status, 200);
    assert_eq!(found.json(), created.json());
}
