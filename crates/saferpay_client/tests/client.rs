use std::sync::Arc;

use masking::Secret;
use saferpay_client::{
    events::{ApiOperation, ApiOutcome, CollectingLogDispatcher},
    requests::ReturnUrls,
    responses::TransactionStatus,
    ClientError, SaferpayClient, SaferpayConfig, SaferpayHttpClient,
};
use saferpay_domain::Payment;
use serde_json::json;
use url::Url;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn config(server: &MockServer) -> SaferpayConfig {
    SaferpayConfig {
        username: Secret::new("test".to_string()),
        password: Secret::new("test".to_string()),
        customer_id: "123".to_string(),
        terminal_id: "456".to_string(),
        sandbox: true,
        use_authorize: true,
        allowed_payment_methods: vec!["VISA".to_string(), "MASTERCARD".to_string()],
        base_url: Some(Url::parse(&server.uri()).unwrap()),
    }
}

fn payment_with_details(token: Option<&str>, transaction_id: Option<&str>) -> Payment {
    let mut payment = Payment::new(1, 10000, "CHF");
    payment.details.token = token.map(ToString::to_string);
    payment.details.transaction_id = transaction_id.map(ToString::to_string);
    payment
}

fn response_header() -> serde_json::Value {
    json!({
        "SpecVersion": "1.33",
        "RequestId": "b27de121-ffa0-4f1d-b7aa-b48109a88486",
    })
}

#[tokio::test]
async fn assert_parses_a_successful_transaction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Payment/v1/PaymentPage/Assert"))
        .and(header("Authorization", "Basic dGVzdDp0ZXN0"))
        .and(body_partial_json(json!({
            "Token": "234uhfh78234hlasdfh8234e1234",
            "RequestHeader": { "SpecVersion": "1.33", "CustomerId": "123", "RetryIndicator": 0 },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResponseHeader": response_header(),
            "Transaction": {
                "Type": "PAYMENT",
                "Status": "AUTHORIZED",
                "Id": "723n4MAjMdhjSAhAKEUdA8jtl9jb",
                "Date": "2015-01-30T12:45:22.258+01:00",
                "Amount": { "Value": "10000", "CurrencyCode": "CHF" },
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = Arc::new(CollectingLogDispatcher::new());
    let client = SaferpayHttpClient::with_dispatcher(config(&server), dispatcher.clone());

    let response = client
        .assert(&payment_with_details(
            Some("234uhfh78234hlasdfh8234e1234"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let transaction = response.transaction().unwrap();
    assert_eq!(transaction.status, TransactionStatus::Authorized);
    assert_eq!(transaction.id, "723n4MAjMdhjSAhAKEUdA8jtl9jb");
    assert_eq!(response.error(), None);

    let events = dispatcher.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, ApiOperation::Assert);
    assert_eq!(events[0].outcome, ApiOutcome::Succeeded);
    assert_eq!(events[0].status_code, 200);
}

#[tokio::test]
async fn assert_parses_a_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Payment/v1/PaymentPage/Assert"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "ResponseHeader": response_header(),
            "Behavior": "ABORT",
            "ErrorName": "TRANSACTION_ABORTED",
            "ErrorMessage": "Transaction aborted by the payer",
            "TransactionId": "723n4MAjMdhjSAhAKEUdA8jtl9jb",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = Arc::new(CollectingLogDispatcher::new());
    let client = SaferpayHttpClient::with_dispatcher(config(&server), dispatcher.clone());

    let response = client
        .assert(&payment_with_details(Some("a-token"), None))
        .await
        .unwrap();

    assert_eq!(response.status_code, 402);
    assert_eq!(response.transaction(), None);
    let error = response.error().unwrap();
    assert_eq!(error.error_name, "TRANSACTION_ABORTED");
    assert_eq!(error.transaction_id.as_deref(), Some("723n4MAjMdhjSAhAKEUdA8jtl9jb"));

    assert_eq!(dispatcher.events()[0].outcome, ApiOutcome::Failed);
}

#[tokio::test]
async fn assert_without_a_token_never_reaches_the_gateway() {
    let server = MockServer::start().await;
    let client = SaferpayHttpClient::new(config(&server));

    let report = client
        .assert(&payment_with_details(None, None))
        .await
        .unwrap_err();

    assert_eq!(
        report.current_context(),
        &ClientError::MissingRequiredField {
            field_name: "token"
        },
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn capture_posts_the_stored_transaction_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Payment/v1/Transaction/Capture"))
        .and(body_partial_json(json!({
            "TransactionReference": { "TransactionId": "723n4MAjMdhjSAhAKEUdA8jtl9jb" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResponseHeader": response_header(),
            "CaptureId": "CAPTURE-1",
            "Status": "CAPTURED",
            "Date": "2015-01-30T12:45:22.258+01:00",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SaferpayHttpClient::new(config(&server));

    let response = client
        .capture(&payment_with_details(
            None,
            Some("723n4MAjMdhjSAhAKEUdA8jtl9jb"),
        ))
        .await
        .unwrap();

    let success = response.success().unwrap();
    assert_eq!(success.capture_id, "CAPTURE-1");
    assert_eq!(success.status, TransactionStatus::Captured);
}

#[tokio::test]
async fn capture_without_a_transaction_id_never_reaches_the_gateway() {
    let server = MockServer::start().await;
    let client = SaferpayHttpClient::new(config(&server));

    let report = client
        .capture(&payment_with_details(None, None))
        .await
        .unwrap_err();

    assert_eq!(
        report.current_context(),
        &ClientError::MissingRequiredField {
            field_name: "transaction_id"
        },
    );
}

#[tokio::test]
async fn initialize_opens_a_payment_page_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Payment/v1/PaymentPage/Initialize"))
        .and(body_partial_json(json!({
            "TerminalId": "456",
            "Payment": {
                "Amount": { "Value": "10000", "CurrencyCode": "CHF" },
                "OrderId": "000000042",
            },
            "PaymentMethods": ["VISA", "MASTERCARD"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResponseHeader": response_header(),
            "Token": "234uhfh78234hlasdfh8234e1234",
            "Expiration": "2015-01-30T12:45:22.258+01:00",
            "RedirectUrl": "https://test.saferpay.com/vt2/api/PaymentPage/1234/12341234/234uhfh78234hlasdfh8234e1234",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SaferpayHttpClient::new(config(&server));
    let return_urls = ReturnUrls {
        success: Url::parse("https://shop.example/return/success").unwrap(),
        fail: Url::parse("https://shop.example/return/fail").unwrap(),
        abort: None,
    };

    let response = client
        .initialize(&payment_with_details(None, None), "000000042", &return_urls)
        .await
        .unwrap();

    let success = response.success().unwrap();
    assert_eq!(success.token, "234uhfh78234hlasdfh8234e1234");
    assert!(success.redirect_url.as_str().contains("PaymentPage"));
}

#[tokio::test]
async fn a_malformed_success_body_is_a_deserialization_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Payment/v1/PaymentPage/Assert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResponseHeader": response_header(),
        })))
        .mount(&server)
        .await;

    let client = SaferpayHttpClient::new(config(&server));

    let report = client
        .assert(&payment_with_details(Some("a-token"), None))
        .await
        .unwrap_err();

    assert_eq!(
        report.current_context(),
        &ClientError::ResponseDeserializationFailed,
    );
}
