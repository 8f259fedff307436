use std::time::Duration;

use intuition_core::model::{SearchAtomsData, TrustSignalsData};
use intuition_core::{Shares, TrustBand, TrustReport};
use intuition_query::{ClientConfig, IntuitionClient, Operation, QueryError};
use intuition_testkit::{MockEndpoint, GRAPHQL_PATH};

fn client_for(url: &str, timeout_secs: u64) -> IntuitionClient {
    let config = ClientConfig::default()
        .with_endpoint(url)
        .with_timeout_secs(timeout_secs);
    IntuitionClient::new(config).unwrap()
}

#[test]
fn test_search_posts_json_and_decodes() {
    let server = MockEndpoint::ok(
        r#"{"data":{"atoms":[{"term_id":"42","label":"Uniswap","type":"Thing","vault":{"total_shares":"5420000000000000000000","position_count":87}}]}}"#,
    );
    let client = client_for(server.url(), 5);

    let response = client
        .run(&Operation::SearchAtoms {
            term: "Uniswap".into(),
            limit: 10,
        })
        .unwrap();
    let data: SearchAtomsData = response.data().unwrap();
    assert_eq!(data.atoms.len(), 1);
    assert_eq!(data.atoms[0].total_shares(), Shares::from_eth(5420));

    let request = server.single_request();
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.path, GRAPHQL_PATH);
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("accept"), Some("application/json"));
    let body = request.json();
    assert_eq!(body["variables"]["searchTerm"], "%Uniswap%");
    assert_eq!(body["variables"]["limit"], 10);
    assert!(body["query"].as_str().unwrap().contains("query SearchAtoms"));
}

#[test]
fn test_non_success_status_is_api_error() {
    let server = MockEndpoint::respond(503, r#"{"error":"upstream down"}"#);
    let client = client_for(server.url(), 5);

    let err = client.run(&Operation::Atom { atom_id: 1 }).unwrap_err();
    assert_eq!(err.status(), Some(503));
    let message = err.to_string();
    assert!(message.contains("503"), "message was {message}");
    assert!(message.contains("upstream down"));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let server = MockEndpoint::ok("<html>not json</html>");
    let client = client_for(server.url(), 5);

    let err = client.run(&Operation::Atom { atom_id: 1 }).unwrap_err();
    assert!(matches!(err, QueryError::Parse(_)), "got {err}");
}

#[test]
fn test_graphql_errors_are_reported() {
    let server = MockEndpoint::ok(r#"{"errors":[{"message":"unexpected variable atomId"}]}"#);
    let client = client_for(server.url(), 5);

    let err = client.run(&Operation::Atom { atom_id: 1 }).unwrap_err();
    match err {
        QueryError::GraphQl(msg) => assert_eq!(msg, "unexpected variable atomId"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_slow_endpoint_times_out() {
    let server = MockEndpoint::delayed(200, r#"{"data":{}}"#, Duration::from_secs(3));
    let client = client_for(server.url(), 1);

    let err = client.run(&Operation::Atom { atom_id: 1 }).unwrap_err();
    assert!(
        matches!(err, QueryError::Timeout { secs: 1 }),
        "got {err}"
    );
}

#[test]
fn test_invalid_argument_sends_nothing() {
    let server = MockEndpoint::ok(r#"{"data":{"atoms":[]}}"#);
    let client = client_for(server.url(), 1);
    let err = client
        .run(&Operation::SearchAtoms {
            term: String::new(),
            limit: 10,
        })
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
    assert!(server.requests().is_empty());
}

#[test]
fn test_trust_signals_single_request() {
    let server = MockEndpoint::ok(
        r#"{"data":{
            "atom":{"term_id":"12345","label":"Uniswap","type":"Thing","vault":{"total_shares":"1000","position_count":2}},
            "triples":[{"id":"1","predicate":{"label":"is"},"object":{"label":"safe"},
                        "vault":{"total_shares":"600"},"counter_vault":{"total_shares":"400"}}],
            "positions":[{"account":{"id":"0xabc","label":"alice.eth"},"shares":"700"}]
        }}"#,
    );
    let client = client_for(server.url(), 5);

    let response = client
        .run(&Operation::TrustSignals { atom_id: 12345 })
        .unwrap();
    let data: TrustSignalsData = response.data().unwrap();
    let report = TrustReport::build("12345", &data);
    assert_eq!(report.metrics.trust_ratio, Some(0.6));
    assert_eq!(report.metrics.assessment, TrustBand::Mixed);
    assert_eq!(report.top_attestors[0].label.as_deref(), Some("alice.eth"));

    let request = server.single_request();
    let body = request.json();
    assert!(body["query"].as_str().unwrap().contains("query GetTrustSignals"));
    assert_eq!(body["variables"]["atomId"], 12345);
}
