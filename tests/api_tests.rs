mod common;

use common::harness::{spawn_mock_server, spawn_stub_server, spawn_unavailable_server};
use common::http_client::TestClient;

use veridict::classifier::Classification;
use veridict::constants::{LABEL_FAKE, LABEL_TRUTHFUL};
use veridict::policy::Verdict;

#[tokio::test]
async fn test_root_reports_identity() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let body = client.root().await.expect("root request failed");

    assert_eq!(body["message"], "Fake News Detection API");
    assert_eq!(body["status"], "running");
    assert_eq!(body["model"], "roberta-large-mnli");
}

#[tokio::test]
async fn test_health_reports_stub_mode() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let body = client.health().await.expect("health request failed");

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["mode"], "stub");
}

#[tokio::test]
async fn test_predict_returns_probability_in_range_with_consistent_label() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let texts = [
        "NASA's Perseverance rover landed on Mars in February 2021.",
        "SHOCKING!!! Secret miracle cure EXPOSED - the government is hiding it!!!",
        "The city council approved the transit budget on Tuesday.",
    ];

    for text in texts {
        let (prediction, status) = client.predict(text).await.expect("predict failed");

        assert_eq!(status, "ok");
        assert!(
            (0.0..=1.0).contains(&prediction.truth_probability),
            "probability out of range for {text:?}"
        );
        let expected = if prediction.truth_probability > 0.5 {
            Verdict::True
        } else {
            Verdict::False
        };
        assert_eq!(prediction.label, expected, "label mismatch for {text:?}");
    }
}

#[tokio::test]
async fn test_predict_is_deterministic_across_requests() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let text = "Scientists documented over 10,000 cases of people becoming invisible!";
    let (first, _) = client.predict(text).await.unwrap();
    let (second, _) = client.predict(text).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_predict_empty_text_returns_400() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let (status, body) = client
        .predict_raw(&serde_json::json!({"text": ""}))
        .await
        .unwrap();

    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));

    let (status, _) = client
        .predict_raw(&serde_json::json!({"text": "   "}))
        .await
        .unwrap();
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_against_canned_distribution() {
    let result = Classification::from_pairs([(LABEL_TRUTHFUL, 0.98_f32), (LABEL_FAKE, 0.02_f32)]);
    let server = spawn_mock_server(result).await.unwrap();
    let client = TestClient::new(server.url());

    let (prediction, _) = client.predict("This is a test text.").await.unwrap();

    assert_eq!(prediction.truth_probability, 0.98);
    assert_eq!(prediction.label, Verdict::True);
}

#[tokio::test]
async fn test_predict_with_unavailable_model_returns_500() {
    let server = spawn_unavailable_server().await.unwrap();
    let client = TestClient::new(server.url());

    let (status, body) = client
        .predict_raw(&serde_json::json!({"text": "Some news text."}))
        .await
        .unwrap();

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("model not loaded"));

    // Liveness endpoints stay up while predictions fail.
    let health = client.health().await.unwrap();
    assert_eq!(health["model_loaded"], false);
}
