//! Tests for Transport header construction.

use duet_llm::Transport;

#[test]
fn bearer_sets_authorization_header() {
    let client = duet_llm::Client::new();
    let transport =
        Transport::bearer(client, "test-key", "http://example.com/v1/chat").expect("bearer");

    let auth = transport
        .headers()
        .get("authorization")
        .expect("authorization header");
    assert_eq!(auth.to_str().unwrap(), "Bearer test-key");
    assert_eq!(transport.base_url(), "http://example.com/v1/chat");
}

#[test]
fn no_auth_omits_authorization_header() {
    let client = duet_llm::Client::new();
    let transport = Transport::no_auth(client, "http://localhost:11434");

    assert!(transport.headers().get("authorization").is_none());
    assert_eq!(transport.base_url(), "http://localhost:11434");
}

#[test]
fn bearer_sets_content_type_and_accept() {
    let client = duet_llm::Client::new();
    let transport = Transport::bearer(client, "k", "http://example.com").expect("bearer");

    let ct = transport
        .headers()
        .get("content-type")
        .expect("content-type");
    assert_eq!(ct.to_str().unwrap(), "application/json");
    let accept = transport.headers().get("accept").expect("accept");
    assert_eq!(accept.to_str().unwrap(), "application/json");
}

#[test]
fn trailing_slash_is_trimmed() {
    let client = duet_llm::Client::new();
    let transport = Transport::no_auth(client, "http://localhost:11434/");

    assert_eq!(transport.base_url(), "http://localhost:11434");
}
