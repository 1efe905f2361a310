// End-to-end: build a rule from tokens and post it to a mock rules API.
use rulekit::{
    BuilderCommand, BuilderMode, Operator, RulesApiClient, SerializationError, SubmitError,
    TokenKind, ValidationError, Workbench,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn append(bench: &Workbench, token: TokenKind) {
    bench
        .dispatch(BuilderMode::Rule, BuilderCommand::Append { token })
        .expect("append token");
}

#[tokio::test]
async fn waiting_hours_rule_is_posted_with_numeric_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rules"))
        .and(body_json(json!({
            "condition": "waiting_hours > 5",
            "weight": 10,
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rule_id": "AR-12345678",
            "condition": "waiting_hours > 5",
            "weight": 10,
            "is_active": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));
    append(&bench, TokenKind::field("waiting_hours"));
    append(&bench, TokenKind::op(Operator::Gt));
    append(&bench, TokenKind::value("5"));

    assert_eq!(bench.preview(BuilderMode::Rule), "[Bekleme Süresi] > '5'");

    let condition = bench.submit_rule(Some("10")).await.expect("submit");
    assert_eq!(condition, "waiting_hours > 5");
    assert_eq!(bench.preview(BuilderMode::Rule), "...");
}

#[tokio::test]
async fn server_rejection_keeps_the_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rules"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "invalid condition"})),
        )
        .mount(&server)
        .await;

    let bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));
    append(&bench, TokenKind::field("urgency"));
    append(&bench, TokenKind::op(Operator::Eq));
    append(&bench, TokenKind::value("HIGH"));

    let err = bench.submit_rule(Some("20")).await.unwrap_err();
    match err {
        SubmitError::Api(api) => assert_eq!(api.message(), "invalid condition"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(bench.builder(BuilderMode::Rule).lock().len(), 3);
}

#[tokio::test]
async fn local_validation_blocks_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));

    let empty = bench.submit_rule(Some("10")).await.unwrap_err();
    assert!(matches!(
        empty,
        SubmitError::Validation(ValidationError::Serialization(
            SerializationError::EmptyExpression
        ))
    ));

    append(&bench, TokenKind::field("service"));
    append(&bench, TokenKind::op(Operator::Eq));
    append(&bench, TokenKind::value("TV+"));
    let missing_weight = bench.submit_rule(Some("  ")).await.unwrap_err();
    assert!(matches!(
        missing_weight,
        SubmitError::Validation(ValidationError::MissingWeight)
    ));

    append(&bench, TokenKind::and());
    append(&bench, TokenKind::unselected_field());
    let unselected = bench.submit_rule(Some("5")).await.unwrap_err();
    assert!(matches!(
        unselected,
        SubmitError::Validation(ValidationError::Serialization(
            SerializationError::UnselectedField(_)
        ))
    ));
}
