//! Test `PUT /unicorns/{name}`.

use serde_json::json;

use crate::e2e_tests::helpers::TestServer;

#[test]
fn test_update_changes_only_supplied_fields() {
    let server = TestServer::new();
    let before = server.get("/unicorns/Pilot").json();

    let response = server.put(
        "/unicorns/pilot",
        &json!({ "loves": "hay", "weight": 655, "gender": "female" }),
    );
    assert_eq!(response.status, 200);
    let after = response.json();

    assert_eq!(after["loves"], json!(["hay"]));
    assert_eq!(after["weight"], json!(655.0));
    assert_eq!(after["gender"], "f");
    assert_eq!(after["_id"], before["_id"]);
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["dob"], before["dob"]);
    assert_eq!(after["vampires"], before["vampires"]);
    assert_eq!(after["vaccinated"], before["vaccinated"]);
    assert_eq!(server.get("/unicorns/Pilot").json(), after);
}

#[test]
fn test_update_with_no_known_fields_is_a_no_op() {
    let server = TestServer::new();
    let before = server.get("/unicorns/Dunx").json();
    let response = server.put("/unicorns/Dunx", &json!({ "horn": "silver" }));
    assert_eq!(response.status, 200);
    assert_eq!(response.json(), before);
}

#[test]
fn test_update_does_not_rename() {
    let server = TestServer::new();
    let response = server.put("/unicorns/Dunx", &json!({ "name": "Dunxie" }));
    assert_eq!(response.status, 200);
    assert_eq!(response.json()["name"], "Dunx");
    assert_eq!(server.get("/unicorns/Dunxie").status, 404);
}

#[test]
fn test_update_clears_vampires_with_empty_string() {
    let server = TestServer::new();
    let response = server.put("/unicorns/Dunx", &json!({ "vampires": "" }));
    assert_eq!(response.status, 200);
    assert!(response.json().get("vampires").is_none());
    assert!(server.search_names("vampiresExists=false").contains(&"Dunx".to_owned()));
}

#[test]
fn test_update_clears_vampires_with_null() {
    let server = TestServer::new();
    let response = server.put("/unicorns/Dunx", &json!({ "vampires": null }));
    assert_eq!(response.status, 200);
    assert!(response.json().get("vampires").is_none());
    assert!(server.get("/unicorns/Dunx").json().get("vampires").is_none());
}

#[test]
fn test_update_dob_is_normalized() {
    let server = TestServer::new();
    let response = server.put("/unicorns/Dunx", &json!({ "dob": "1976-07-18" }));
    assert_eq!(response.json()["dob"], "1976-07-18T00:00:00.000Z");
}

#[test]
fn test_update_bad_value_leaves_record_untouched() {
    let server = TestServer::new();
    let before = server.get("/unicorns/Dunx").json();
    let response = server.put(
        "/unicorns/Dunx",
        &json!({ "weight": 1, "vaccinated": "sometimes" }),
    );
    assert_eq!(response.status, 400);
    assert_eq!(server.get("/unicorns/Dunx").json(), before);
}

#[test]
fn test_update_missing_record() {
    let server = TestServer::new();
    let response = server.put("/unicorns/Nobody", &json!({ "weight": 1 }));
    assert_eq!(response.status, 404);
    assert_eq!(response.error(), "Unicorn not found");
}
