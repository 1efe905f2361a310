// Integration: listing, editing and deleting stored rules.
use rulekit::{ApiError, RulesApiClient, Workbench};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn bench_for(server: &MockServer) -> Workbench {
    Workbench::with_client(RulesApiClient::new(&server.uri()).expect("client"))
}

#[tokio::test]
async fn lists_stored_rules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"rule_id": "AR-1", "condition": "urgency == 'HIGH'", "weight": 30, "is_active": true},
            {"rule_id": "AR-2", "condition": "waiting_hours > 48", "weight": 15, "is_active": false}
        ])))
        .mount(&server)
        .await;

    let rules = bench_for(&server).await.rules().await.expect("rules");
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[1].rule_id, "AR-2");
    assert!(!rules[1].is_active);
}

#[tokio::test]
async fn weight_and_activation_are_partial_updates() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/rules/AR-1"))
        .and(body_json(json!({"weight": 25})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rule_id": "AR-1", "condition": "urgency == 'HIGH'", "weight": 25, "is_active": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/rules/AR-1"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rule_id": "AR-1", "condition": "urgency == 'HIGH'", "weight": 25, "is_active": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bench = bench_for(&server).await;
    bench.set_rule_weight("AR-1", 25).await.expect("weight");
    bench.set_rule_active("AR-1", false).await.expect("toggle");
}

#[tokio::test]
async fn delete_reports_missing_rule() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rules/AR-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Rule deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rules/AR-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Rule not found"})))
        .mount(&server)
        .await;

    let bench = bench_for(&server).await;
    bench.delete_rule("AR-1").await.expect("delete");

    let err = bench.delete_rule("AR-404").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { ref message, .. } if message == "Rule not found"));
}
