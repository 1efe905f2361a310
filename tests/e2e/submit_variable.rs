// End-to-end: build a formula, store it as a variable, then use it in a rule.
use rulekit::{BuilderCommand, BuilderMode, Operator, RulesApiClient, TokenKind, Workbench};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn stored_variable_becomes_a_rule_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rules/variables"))
        .and(body_json(json!({
            "name": "risk_score",
            "formula": "( urgency_score * 2 ) + 10",
            "description": "Aciliyet bazlı risk"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "variable_id": "VAR-1",
            "name": "risk_score",
            "formula": "( urgency_score * 2 ) + 10",
            "description": "Aciliyet bazlı risk"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rules/variables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"variable_id": "VAR-1", "name": "risk_score", "formula": "( urgency_score * 2 ) + 10"}
        ])))
        .mount(&server)
        .await;

    let mut bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));
    for token in [
        TokenKind::open(),
        TokenKind::field("urgency_score"),
        TokenKind::op(Operator::Mul),
        TokenKind::constant("2"),
        TokenKind::close(),
        TokenKind::op(Operator::Add),
        TokenKind::constant("10"),
    ] {
        bench
            .dispatch(BuilderMode::Formula, BuilderCommand::Append { token })
            .expect("append");
    }
    assert_eq!(
        bench.preview(BuilderMode::Formula),
        "( [Aciliyet Puanı] * '2' ) + '10'"
    );

    let formula = bench
        .submit_variable("risk_score", Some("Aciliyet bazlı risk"))
        .await
        .expect("submit variable");
    assert_eq!(formula, "( urgency_score * 2 ) + 10");

    bench.refresh_fields().await;
    bench
        .dispatch(
            BuilderMode::Rule,
            BuilderCommand::Append {
                token: TokenKind::field("risk_score"),
            },
        )
        .expect("variable is selectable");
    assert_eq!(bench.preview(BuilderMode::Rule), "[risk_score (Değişken)]");
}

#[tokio::test]
async fn blank_name_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let bench = Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"));
    bench
        .dispatch(
            BuilderMode::Formula,
            BuilderCommand::Append {
                token: TokenKind::field("waiting_hours"),
            },
        )
        .expect("append");

    assert!(bench.submit_variable("", None).await.is_err());
    assert_eq!(bench.builder(BuilderMode::Formula).lock().len(), 1);
}
