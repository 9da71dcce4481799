//! Test `GET /unicorns` with query criteria.

use serde_json::{Value, json};

use crate::e2e_tests::helpers::{TestServer, names};

fn lucky_and_luna() -> TestServer {
    let bodies: [Value; 2] = [
        json!({
            "name": "Lucky",
            "dob": "2015-04-01",
            "loves": ["Carrots", "Sugar"],
            "weight": 500,
            "gender": "f",
            "vaccinated": true
        }),
        json!({
            "name": "Luna",
            "dob": "2016-09-12",
            "loves": ["Carrots"],
            "weight": 300,
            "vampires": 2,
            "gender": "m",
            "vaccinated": false
        }),
    ];
    TestServer::with_bodies(&bodies)
}

#[test]
fn test_no_criteria_lists_everything_in_order() {
    let server = lucky_and_luna();
    let response = server.get("/unicorns");
    assert_eq!(response.status, 200);
    assert_eq!(names(&response.json()), vec!["Lucky", "Luna"]);
}

#[test]
fn test_loves_requires_every_item() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("loves=carrots,sugar"), vec!["Lucky"]);
    assert_eq!(server.search_names("loves=CARROTS"), vec!["Lucky", "Luna"]);
    assert_eq!(server.search_names("loves=%20carrots%20,%20sugar%20"), vec!["Lucky"]);
}

#[test]
fn test_vampires_exists() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("vampiresExists=true"), vec!["Luna"]);
    assert_eq!(server.search_names("vampiresExists=false"), vec!["Lucky"]);
}

#[test]
fn test_weight_bounds() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("weightGreaterThan=400"), vec!["Lucky"]);
    assert_eq!(server.search_names("weightLessThan=400"), vec!["Luna"]);
    assert_eq!(
        server.search_names("weightGreaterThan=299.5&weightLessThan=500.5"),
        vec!["Lucky", "Luna"]
    );
    assert!(server.search_names("weightGreaterThan=500").is_empty());
}

#[test]
fn test_gender_synonyms() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("gender=female"), vec!["Lucky"]);
    assert_eq!(server.search_names("gender=MALE"), vec!["Luna"]);
    assert_eq!(server.search_names("gender=f"), vec!["Lucky"]);
}

#[test]
fn test_vampires_greater_than_never_matches_absent() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("vampiresGreaterThan=-1"), vec!["Luna"]);
    assert_eq!(server.search_names("vampiresGreaterThan=1"), vec!["Luna"]);
    assert!(server.search_names("vampiresGreaterThan=2").is_empty());
}

#[test]
fn test_vaccinated_flag() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("vaccinated=true"), vec!["Lucky"]);
    assert_eq!(server.search_names("vaccinated=false"), vec!["Luna"]);
}

#[test]
fn test_name_substring_any_case() {
    let server = lucky_and_luna();
    assert_eq!(server.search_names("name=LU"), vec!["Lucky", "Luna"]);
    assert_eq!(server.search_names("name=cky"), vec!["Lucky"]);
}

#[test]
fn test_criteria_compose_conjunctively() {
    let server = lucky_and_luna();
    assert_eq!(
        server.search_names("loves=carrots&vaccinated=false&name=lu"),
        vec!["Luna"]
    );
    assert!(server.search_names("gender=f&vampiresExists=true").is_empty());
}

#[test]
fn test_empty_values_and_unknown_keys_are_ignored() {
    let server = lucky_and_luna();
    assert_eq!(
        server.search_names("name=&weightGreaterThan=&horn=golden"),
        vec!["Lucky", "Luna"]
    );
}

#[test]
fn test_seeded_herd_search() {
    let server = TestServer::new();
    assert_eq!(
        server.search_names("loves=apple&gender=m"),
        vec!["Roooooodles", "Raleigh", "Pilot"]
    );
    assert_eq!(server.search_names("vampiresExists=false"), vec!["Nimue"]);
}

#[test]
fn test_returned_records_are_fully_serialized() {
    let server = lucky_and_luna();
    let records = server.get("/unicorns?name=luna").json();
    let luna = &records[0];
    assert_eq!(luna["dob"], "2016-09-12T00:00:00.000Z");
    assert_eq!(luna["loves"], json!(["Carrots"]));
    assert_eq!(luna["weight"], json!(300.0));
    assert_eq!(luna["vampires"], 2);
    assert_eq!(luna["gender"], "m");
    assert_eq!(luna["vaccinated"], false);
    assert!(luna["_id"].is_string());
}
