// Integration: dynamic field synchronisation against the rules API.
use rulekit::{BuilderCommand, BuilderMode, RulesApiClient, TokenKind, Workbench};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn repeated_refresh_leaves_registry_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/variables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "risk_score", "formula": "urgency_score * 2"},
            {"name": "load_factor", "formula": "capacity_usage / 100"}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let mut bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));
    let first = bench.refresh_fields().await;
    let after_first = bench.registry().all().to_vec();
    let second = bench.refresh_fields().await;

    assert_eq!(first, second);
    assert_eq!(bench.registry().all(), after_first.as_slice());
    let keys: Vec<_> = after_first.iter().map(|field| field.key.as_str()).collect();
    assert_eq!(&keys[keys.len() - 2..], &["risk_score", "load_factor"]);
}

#[tokio::test]
async fn unreachable_api_keeps_static_fields_usable() {
    let mut bench = Workbench::with_client(RulesApiClient::new("http://127.0.0.1:9").expect("client"));
    let before = bench.registry().all().to_vec();

    assert!(bench.refresh_fields().await.is_empty());
    assert_eq!(bench.registry().all(), before.as_slice());

    bench
        .dispatch(
            BuilderMode::Rule,
            BuilderCommand::Append {
                token: TokenKind::field("capacity_usage"),
            },
        )
        .expect("static field still selectable");
}

#[tokio::test]
async fn refresh_updates_open_builders_and_keeps_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/variables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "risk_score", "formula": "urgency_score * 2"}
        ])))
        .mount(&server)
        .await;

    let mut bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));
    let id = bench
        .dispatch(
            BuilderMode::Formula,
            BuilderCommand::Append {
                token: TokenKind::field("waiting_hours"),
            },
        )
        .expect("append")
        .expect("token id");

    bench.refresh_fields().await;

    let builder = bench.builder(BuilderMode::Formula);
    let builder = builder.lock();
    assert!(builder.fields().iter().any(|field| field.key == "risk_score"));
    assert_eq!(
        builder.token(id).map(|token| token.kind.clone()),
        Some(TokenKind::field("waiting_hours"))
    );
}
