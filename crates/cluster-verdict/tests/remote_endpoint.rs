//! Remote comparator against a mock chat-completion endpoint.
//!
//! The comparator uses a blocking client, so every call runs on a blocking
//! thread while the mock server lives on the test runtime.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cluster_verdict::{
    encode_png_base64, png_data_url, RemoteComparator, RemoteConfig, SizeClass, Verdict,
    VerdictError,
};
use image::{Rgb, RgbImage};

// ─────────────────────── helpers ───────────────────────

const API_PATH: &str = "/v1/chat/completions";

fn config_for(server: &MockServer) -> RemoteConfig {
    RemoteConfig::new("test-key").with_endpoint(format!("{}{API_PATH}", server.uri()))
}

fn answer(content: &str) -> Value {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "model": "pixtral-large-2411",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Run a comparison on a blocking thread.
async fn compare(
    config: RemoteConfig,
    actual: RgbImage,
    reference: RgbImage,
) -> Result<Verdict, VerdictError> {
    tokio::task::spawn_blocking(move || {
        let comparator = RemoteComparator::new(config)?;
        comparator.compare(&actual, &reference)
    })
    .await
    .expect("comparison thread panicked")
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "exactly one request per comparison");
    serde_json::from_slice(&requests[0].body).unwrap()
}

// ─────────────────────── tests ───────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn success_returns_model_text_unmodified() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(answer("Verdict: Same images")),
    )
    .await;

    let img = RgbImage::new(300, 300);
    let verdict = compare(config_for(&server), img.clone(), img).await.unwrap();

    assert_eq!(verdict, Verdict::Judged("Verdict: Same images".to_string()));
    assert_eq!(verdict.render(), "Verdict: Same images");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_becomes_unavailable_verdict() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(500).set_body_string("server error"),
    )
    .await;

    let img = RgbImage::new(64, 64);
    let verdict = compare(config_for(&server), img.clone(), img).await.unwrap();

    assert_eq!(
        verdict,
        Verdict::Unavailable {
            status: 500,
            body: "server error".to_string()
        }
    );
    let text = verdict.render();
    assert!(text.contains("500"));
    assert!(text.contains("server error"));
    assert!(text.ends_with("Kindly check this case manually."));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_200_success_status_is_not_a_verdict() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(202).set_body_json(answer("Verdict: Same images")),
    )
    .await;

    let img = RgbImage::new(10, 10);
    let verdict = compare(config_for(&server), img.clone(), img).await.unwrap();
    assert_eq!(verdict.status(), Some(202));
}

#[tokio::test(flavor = "multi_thread")]
async fn request_carries_model_and_ordered_content() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(answer("Verdict: Same images")),
    )
    .await;

    let actual = RgbImage::from_pixel(120, 40, Rgb([255, 0, 0]));
    let reference = RgbImage::from_pixel(120, 40, Rgb([0, 0, 255]));
    let config = config_for(&server).with_model("pixtral-12b-2409");
    compare(config, actual.clone(), reference.clone())
        .await
        .unwrap();

    let body = sent_body(&server).await;
    assert_eq!(body["model"], "pixtral-12b-2409");

    let content = body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 3);
    assert_eq!(
        content[0]["text"].as_str().unwrap(),
        SizeClass::EnlargedIcon.instructions()
    );
    let actual_url = png_data_url(&encode_png_base64(&actual).unwrap());
    let reference_url = png_data_url(&encode_png_base64(&reference).unwrap());
    assert_eq!(content[1]["image_url"], actual_url.as_str());
    assert_eq!(content[2]["image_url"], reference_url.as_str());
}

#[tokio::test(flavor = "multi_thread")]
async fn asymmetric_size_check_reaches_the_wire() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(answer("Verdict: Same images")),
    )
    .await;

    // Wide but short actual, narrow but tall reference: full-frame.
    compare(
        config_for(&server),
        RgbImage::new(300, 100),
        RgbImage::new(100, 300),
    )
    .await
    .unwrap();

    let body = sent_body(&server).await;
    let text = body["messages"][0]["content"][0]["text"].as_str().unwrap();
    assert_eq!(text, SizeClass::FullFrame.instructions());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_success_body_is_an_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
    )
    .await;

    let img = RgbImage::new(8, 8);
    let err = compare(config_for(&server), img.clone(), img)
        .await
        .unwrap_err();
    assert!(matches!(err, VerdictError::MalformedResponse(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_propagates() {
    // Nothing listens on the discard port of localhost.
    let config =
        RemoteConfig::new("test-key").with_endpoint("http://127.0.0.1:9/v1/chat/completions");
    let img = RgbImage::new(8, 8);
    let err = compare(config, img.clone(), img).await.unwrap_err();
    assert!(matches!(err, VerdictError::Http(_)));
}
