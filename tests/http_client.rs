mod common;

use binsmart::client::{Classifier, HttpClassifier};
use binsmart::domain::{
    ClassificationFailure, ClassificationRequest, ClassificationResponse, Outcome, RejectReason,
};
use common::LoopbackServer;
use std::sync::Arc;
use std::time::Duration;

fn request(file_name: &str) -> ClassificationRequest {
    ClassificationRequest {
        payload: Arc::from(common::TINY_PNG),
        file_name: file_name.to_string(),
        mime_type: "image/png",
    }
}

fn classify(server: &LoopbackServer, file_name: &str) -> Outcome {
    let client = HttpClassifier::new(server.url(), Duration::from_secs(5)).expect("client");
    client.classify(&request(file_name))
}

#[test]
fn posts_image_as_multipart_file_field() {
    let server = LoopbackServer::respond(200, r#"{"prediction":"Recyclable","confidence":0.92}"#);
    classify(&server, "bottle.png");
    let captured = server.captured();

    assert_eq!(captured.request_line, "POST /predict HTTP/1.1");
    assert!(captured
        .header("content-type")
        .is_some_and(|value| value.starts_with("multipart/form-data; boundary=")));

    let body = captured.body_text();
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="bottle.png""#));
    assert!(body.contains("Content-Type: image/png"));
    assert!(captured
        .body
        .windows(common::TINY_PNG.len())
        .any(|window| window == common::TINY_PNG));
}

#[test]
fn confident_answer_is_accepted() {
    let server = LoopbackServer::respond(200, r#"{"prediction":"Food Waste","confidence":0.88}"#);
    let outcome = classify(&server, "apple.png");
    server.captured();

    assert_eq!(
        outcome,
        Outcome::Accepted(ClassificationResponse {
            prediction: "Food Waste".into(),
            confidence: 0.88,
        })
    );
}

#[test]
fn unconfident_answer_is_rejected() {
    let server = LoopbackServer::respond(200, r#"{"prediction":"Organic","confidence":0.6}"#);
    let outcome = classify(&server, "peel.png");
    server.captured();

    assert_eq!(
        outcome,
        Outcome::Rejected(RejectReason::LowConfidence { confidence: 0.6 })
    );
}

#[test]
fn error_status_becomes_service_failure() {
    let server = LoopbackServer::respond(500, r#"{"detail":"model not loaded"}"#);
    let outcome = classify(&server, "can.png");
    server.captured();

    let Outcome::Failed(failure) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(failure, ClassificationFailure::Service { status: 500 });
    assert_eq!(failure.to_string(), "Error: 500");
}

#[test]
fn non_json_body_is_malformed() {
    let server = LoopbackServer::respond(200, "<html>oops</html>");
    let outcome = classify(&server, "can.png");
    server.captured();

    let Outcome::Failed(failure @ ClassificationFailure::Malformed(_)) = outcome else {
        panic!("expected malformed failure, got {outcome:?}");
    };
    assert!(failure.to_string().starts_with("Failed to process image: "));
}

#[test]
fn out_of_range_confidence_is_malformed() {
    let server = LoopbackServer::respond(200, r#"{"prediction":"Recyclable","confidence":1.7}"#);
    let outcome = classify(&server, "can.png");
    server.captured();

    assert!(matches!(
        outcome,
        Outcome::Failed(ClassificationFailure::Malformed(_))
    ));
}

#[test]
fn missing_prediction_defaults_to_empty_label() {
    let server = LoopbackServer::respond(200, r#"{"confidence":0.97}"#);
    let outcome = classify(&server, "thing.png");
    server.captured();

    let Outcome::Accepted(response) = outcome else {
        panic!("expected acceptance, got {outcome:?}");
    };
    assert_eq!(response.prediction, "");
    assert_eq!(
        binsmart::presenter::present(&response).category,
        binsmart::presenter::BinCategory::Other
    );
}
