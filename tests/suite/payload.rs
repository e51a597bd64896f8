//! Wire shape of the submitted payload.

use moodlens_engine::QUESTION_COUNT;
use moodlens_types::QUESTION_CATALOG;
use wiremock::MockServer;

use crate::common::{
    EXPECTED_AGE, build_app, complete_questionnaire, mount_success, open_questionnaire, settle,
    signed_in_store,
};

fn alternating_answers() -> Vec<char> {
    (0..QUESTION_COUNT)
        .map(|i| if i % 2 == 0 { 'y' } else { 'n' })
        .collect()
}

#[tokio::test]
async fn payload_carries_age_then_answers_in_catalog_order() {
    let server = MockServer::start().await;
    mount_success(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(&server.uri(), Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    complete_questionnaire(&mut app, &alternating_answers());
    settle(&mut app).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let raw = String::from_utf8(requests[0].body.clone()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), QUESTION_COUNT + 1);
    assert_eq!(object["age"], EXPECTED_AGE);
    for (index, question) in QUESTION_CATALOG.iter().enumerate() {
        let expected = u8::from(index % 2 == 0);
        assert_eq!(object[question.field], expected, "field {}", question.field);
    }

    // Key order on the wire: age first, then the catalog.
    let mut cursor = raw.find("\"age\":").expect("age key");
    for question in &QUESTION_CATALOG {
        let key = format!("\"{}\":", question.field);
        let offset = raw[cursor..]
            .find(&key)
            .unwrap_or_else(|| panic!("{} out of order in {raw}", question.field));
        cursor += offset;
    }
}

#[tokio::test]
async fn request_is_json_post() {
    let server = MockServer::start().await;
    mount_success(&server, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(&server.uri(), Some(signed_in_store(&dir)));
    open_questionnaire(&mut app);
    complete_questionnaire(&mut app, &alternating_answers());
    settle(&mut app).await;

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "{content_type}");
}
