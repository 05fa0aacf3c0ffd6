//! Missing key reporting integration tests

mod helpers;

use helpers::*;
use i18n_relay::services::MissingTranslation;
use serde_json::{json, Value};

fn body_of(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).expect("missing key body is JSON")
}

#[tokio::test]
async fn test_each_key_reported_once() {
    let api = TranslationApiMock::start().await;
    api.mock_missing(201, Some(1)).await;

    let services = test_services(&api.uri());
    assert!(services.reporter.report_now("fr", "checkout.title").await);
    assert!(!services.reporter.report_now("fr", "checkout.title").await);

    assert!(services.reporter.is_reported("fr", "checkout.title"));
    api.verify().await;
}

#[tokio::test]
async fn test_payload_carries_fallback_and_module() {
    let api = TranslationApiMock::start().await;
    api.mock_missing(200, None).await;

    let services = test_services(&api.uri());
    services.reporter.report_now("en", "nav.home").await;
    services.reporter.report_now("de", "nav.home").await;

    let requests = api.requests_to(MISSING_PATH).await;
    assert_eq!(requests.len(), 2);

    let bodies: Vec<Value> = requests.iter().map(body_of).collect();
    assert!(bodies.contains(&json!({
        "locale": "en",
        "key": "nav.home",
        "value": "nav.home",
        "module": TEST_MODULE,
    })));
    assert!(bodies.contains(&json!({
        "locale": "de",
        "key": "nav.home",
        "value": "",
        "module": TEST_MODULE,
    })));
}

#[tokio::test]
async fn test_remote_failure_is_swallowed() {
    let api = TranslationApiMock::start().await;
    api.mock_missing(500, Some(1)).await;

    let services = test_services(&api.uri());
    assert!(!services.reporter.report_now("fr", "broken").await);

    // Still counted as reported; no retry for the same pair
    assert!(!services.reporter.report_now("fr", "broken").await);
    assert_eq!(services.reporter.stats().total, 1);
    api.verify().await;
}

#[tokio::test]
async fn test_submit_relays_acknowledgement() {
    let api = TranslationApiMock::start().await;
    api.mock_missing(201, Some(2)).await;

    let services = test_services(&api.uri());
    let missing = MissingTranslation {
        locale: "fr".to_string(),
        key: "cart.empty".to_string(),
        value: "Panier vide".to_string(),
        module: "shop".to_string(),
    };

    let first = services.reporter.submit(&missing).await.expect("submit");
    services.reporter.submit(&missing).await.expect("submit again");

    assert_eq!(first, json!({ "id": 42, "created": true }));
    assert!(!services.reporter.is_reported("fr", "cart.empty"));
    api.verify().await;
}

#[tokio::test]
async fn test_translate_reports_missing_key_in_background() {
    let api = TranslationApiMock::start().await;
    api.mock_dictionary("fr", TEST_MODULE, MockDictionary::ok(json!({ "hello": "Bonjour" })))
        .await;
    api.mock_missing(200, Some(1)).await;

    let services = test_services(&api.uri());
    let t = services.translator_for("fr").await;

    assert_eq!(t.t("hello"), "Bonjour");
    assert_eq!(t.t("goodbye"), "");
    assert_eq!(t.t("goodbye"), "");

    let requests = api.wait_for_requests(MISSING_PATH, 1).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(body_of(&requests[0])["key"], "goodbye");
    api.verify().await;
}

#[tokio::test]
async fn test_unconfigured_endpoint_records_without_sending() {
    let services = test_services("");

    assert!(!services.reporter.report_now("en", "orphan").await);
    assert!(services.reporter.is_reported("en", "orphan"));
    assert_eq!(services.reporter.stats().per_locale.get("en"), Some(&1));
}
