//! Test `DELETE /unicorns/{name}`.

use crate::e2e_tests::helpers::TestServer;

#[test]
fn test_delete_returns_removed_record() {
    let server = TestServer::new();
    let response = server.delete("/unicorns/AYNA");
    assert_eq!(response.status, 200);

    let json = response.json();
    assert_eq!(json["message"], "Unicorn deleted successfully");
    assert_eq!(json["unicorn"]["name"], "Ayna");
    assert_eq!(server.get("/unicorns/Ayna").status, 404);
}

#[test]
fn test_delete_removes_exactly_one_and_keeps_order() {
    let server = TestServer::new();
    let mut expected = server.search_names("");
    server.delete("/unicorns/Solnara");
    expected.retain(|name| name != "Solnara");
    assert_eq!(server.search_names(""), expected);
}

#[test]
fn test_delete_missing_changes_nothing() {
    let server = TestServer::new();
    let before = server.search_names("");
    let response = server.delete("/unicorns/Nobody");
    assert_eq!(response.status, 404);
    assert_eq!(server.search_names(""), before);
}

#[test]
fn test_delete_twice() {
    let server = TestServer::new();
    assert_eq!(server.delete("/unicorns/Kenny").status, 200);
    assert_eq!(server.delete("/unicorns/Kenny").status, 404);
}
