//! Registration and notification integration tests.

mod common;

use common::{new_store, TestHarness, ADMIN_EMAIL, ADMIN_SECRET};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rankboard_service::notify::SIGNATURE_HEADER;
use rankboard_service::ServiceError;
use rankboard_store::RecordStore;

#[tokio::test]
async fn registration_dispatches_signed_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/registrations"))
        .and(header_exists(SIGNATURE_HEADER))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let harness = TestHarness::with_notifier(Some(format!("{}/hooks/registrations", server.uri())));
    let (account, _) = harness.service.register(new_store("techworld")).await.unwrap();
    assert!(account.api_key.as_str().starts_with("rk_"));

    // Delivered notice is verified by the mock's `expect(1)` on drop.
    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["store_name"], "techworld");
    assert_eq!(body["store_email"], "techworld@example.com");
    assert_eq!(body["store_url"], "https://techworld.example.com");
    assert!(body["registration_date"].is_string());
}

#[tokio::test]
async fn notification_failure_does_not_fail_registration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let harness = TestHarness::with_notifier(Some(server.uri()));
    let (account, session) = harness.service.register(new_store("techworld")).await.unwrap();

    // The store exists and can log in despite the failed notice.
    assert_eq!(session.store_id, Some(account.id));
    let session = harness
        .service
        .login("techworld@example.com", "password123")
        .unwrap();
    assert_eq!(session.store_id, Some(account.id));
}

#[tokio::test]
async fn duplicate_email_leaves_no_record() {
    let harness = TestHarness::new();
    harness.service.register(new_store("techworld")).await.unwrap();

    let result = harness.service.register(new_store("techworld")).await;
    assert!(matches!(result, Err(ServiceError::DuplicateEmail { .. })));
    assert_eq!(harness.service.record_store().totals().unwrap().stores, 1);
}

#[tokio::test]
async fn admin_can_reset_everything() {
    let harness = TestHarness::new();
    let (account, _) = harness.service.register(new_store("techworld")).await.unwrap();
    harness.service.record_sale(&account.id, 1000).unwrap();

    let admin = harness.service.login(ADMIN_EMAIL, ADMIN_SECRET).unwrap();
    harness.service.reset(&admin).unwrap();

    let totals = harness.service.record_store().totals().unwrap();
    assert_eq!(totals.stores, 0);
    assert_eq!(totals.orders, 0);
}
