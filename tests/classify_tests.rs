use kreator::ai::classify::{
    ProviderErrorBody, classify_api_error, classify_error_detail, is_sensitive_content_message,
};
use kreator::errors::{KreatorError, SENSITIVE_CONTENT_ERROR_PREFIX};
use reqwest::StatusCode;

fn error_body(message: &str) -> ProviderErrorBody {
    serde_json::from_str(&format!(r#"{{"error":{{"message":"{message}"}}}}"#))
        .expect("test body parses")
}

#[test]
fn test_sensitive_keywords_match_case_insensitively() {
    assert!(is_sensitive_content_message("Request blocked: NUDITY detected"));
    assert!(is_sensitive_content_message("content flagged by provider"));
    assert!(is_sensitive_content_message("Violates our Safety Policy"));
    assert!(!is_sensitive_content_message("rate limit exceeded"));
    assert!(!is_sensitive_content_message(""));
}

#[test]
fn test_sensitive_category_wins_over_credit_for_any_status() {
    // The message mentions both "nudity" and "credit"; sensitive must win,
    // even on a 402
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::PAYMENT_REQUIRED,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let err = classify_api_error(
            "Analisa gambar",
            status,
            &error_body("nudity detected, no credit refunded"),
        );
        assert!(
            matches!(err, KreatorError::SensitiveContent { .. }),
            "status {status} should classify as sensitive content"
        );
        assert!(format!("{err}").starts_with(SENSITIVE_CONTENT_ERROR_PREFIX));
    }
}

#[test]
fn test_status_402_yields_insufficient_credit() {
    let err = classify_api_error(
        "Chatbot",
        StatusCode::PAYMENT_REQUIRED,
        &error_body("request rejected"),
    );
    assert!(matches!(err, KreatorError::InsufficientCredit { .. }));
}

#[test]
fn test_credit_and_token_mentions_yield_insufficient_credit() {
    for message in ["Insufficient credits remaining", "max TOKEN count exceeded"] {
        let err = classify_api_error("Chatbot", StatusCode::BAD_REQUEST, &error_body(message));
        assert!(
            matches!(err, KreatorError::InsufficientCredit { .. }),
            "'{message}' should classify as insufficient credit"
        );
    }
}

#[test]
fn test_unmatched_errors_fall_back_to_upstream_with_status() {
    let err = classify_api_error(
        "Optimasi prompt",
        StatusCode::SERVICE_UNAVAILABLE,
        &error_body("model is overloaded"),
    );
    match err {
        KreatorError::Upstream { operation, status } => {
            assert_eq!(operation, "Optimasi prompt");
            assert_eq!(status, 503);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[test]
fn test_detail_field_is_used_when_error_message_is_absent() {
    let body: ProviderErrorBody =
        serde_json::from_str(r#"{"detail":"no credit left on this key"}"#).unwrap();
    let err = classify_api_error("Chatbot", StatusCode::FORBIDDEN, &body);
    assert!(matches!(err, KreatorError::InsufficientCredit { .. }));
}

#[test]
fn test_empty_fields_fall_through_to_status_text() {
    // Both fields present but empty mirror JS falsiness: they are skipped and
    // the canonical status text ("Too Many Requests") decides the category
    let body: ProviderErrorBody =
        serde_json::from_str(r#"{"error":{"message":""},"detail":""}"#).unwrap();
    let err = classify_api_error("Chatbot", StatusCode::TOO_MANY_REQUESTS, &body);
    assert!(matches!(err, KreatorError::Upstream { status: 429, .. }));
}

#[test]
fn test_classify_error_detail_is_shared_precedence_chain() {
    let err = classify_error_detail("Buat gambar", StatusCode::OK, "sexual content rejected");
    assert!(matches!(err, KreatorError::SensitiveContent { .. }));

    let err = classify_error_detail("Buat gambar", StatusCode::OK, "credit exhausted");
    assert!(matches!(err, KreatorError::InsufficientCredit { .. }));
}
