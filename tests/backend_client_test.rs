//! HTTP generator client against a mockito server: wire format, decline
//! normalization, and failure classification.

use std::time::Duration;

use relay_bot::{GenerateError, HttpReplyGenerator, MessageRecord, ReplyGenerator};
use serde_json::json;

fn record(id: i64, text: &str) -> MessageRecord {
    MessageRecord {
        id,
        text: text.to_string(),
        sender: "alice".to_string(),
        timestamp: 1700000000 + id,
    }
}

fn client(url: String) -> HttpReplyGenerator {
    HttpReplyGenerator::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn posts_chat_id_message_and_history_and_returns_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/reply")
        .match_body(mockito::Matcher::PartialJson(json!({
            "chat_id": 5,
            "new_message": {"id": 2, "text": "how are you?", "sender": "alice"},
            "history": [
                {"id": 1, "text": "hello"},
                {"id": 2, "text": "how are you?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response_text": "fine, thanks"}"#)
        .create_async()
        .await;

    let generator = client(format!("{}/reply", server.url()));
    let history = vec![record(1, "hello"), record(2, "how are you?")];
    let result = generator.generate(5, &history[1], &history).await.unwrap();

    assert_eq!(result, Some("fine, thanks".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn null_response_text_is_a_decline() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/reply")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response_text": null}"#)
        .create_async()
        .await;

    let generator = client(format!("{}/reply", server.url()));
    let new_message = record(1, "hello");
    let result = generator.generate(5, &new_message, &[new_message.clone()]).await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn empty_response_text_is_a_decline() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/reply")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response_text": ""}"#)
        .create_async()
        .await;

    let generator = client(format!("{}/reply", server.url()));
    let new_message = record(1, "hello");
    let result = generator.generate(5, &new_message, &[new_message.clone()]).await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn non_2xx_status_is_classified_as_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/reply")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let generator = client(format!("{}/reply", server.url()));
    let new_message = record(1, "hello");
    let err = generator
        .generate(5, &new_message, &[new_message.clone()])
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::ErrorStatus(503)), "got {:?}", err);
}

#[tokio::test]
async fn unparseable_body_is_classified_as_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/reply")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let generator = client(format!("{}/reply", server.url()));
    let new_message = record(1, "hello");
    let err = generator
        .generate(5, &new_message, &[new_message.clone()])
        .await
        .unwrap_err();

    assert!(
        matches!(err, GenerateError::MalformedResponse(_)),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn connection_failure_is_classified_as_no_response() {
    // Port 9 (discard) is not listening in the test environment.
    let generator = client("http://127.0.0.1:9/reply".to_string());
    let new_message = record(1, "hello");
    let err = generator
        .generate(5, &new_message, &[new_message.clone()])
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::NoResponse(_)), "got {:?}", err);
}
