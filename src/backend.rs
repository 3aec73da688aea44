//! Reply-generation backend: the [`ReplyGenerator`] trait and its HTTP
//! implementation.
//!
//! The backend is untrusted and unreliable. Every transport or protocol
//! problem is classified into a [`GenerateError`] at this boundary; raw
//! reqwest errors never reach turn logic. A successful call yields
//! `Option<String>`: `None` means the backend declined to reply (null or
//! empty `response_text`).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::MessageRecord;

/// Why a generation call produced no usable reply. The subtypes exist so the
/// logs can tell an error response from a dead backend.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The backend answered with a non-2xx status.
    #[error("backend responded with status {0}")]
    ErrorStatus(u16),

    /// No response arrived: connection failure or timeout.
    #[error("no response from backend: {0}")]
    NoResponse(String),

    /// A 2xx response whose body did not parse as the expected shape.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// Anything else (request build failure, redirect loop, ...).
    #[error("backend request failed: {0}")]
    Other(String),
}

/// Produces a reply (or declines) for one turn, given the new message and the
/// post-append history snapshot.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Returns `Ok(Some(text))` for a reply, `Ok(None)` for an explicit
    /// decline, `Err` for any failure. Never panics on backend misbehavior.
    async fn generate(
        &self,
        chat_id: i64,
        new_message: &MessageRecord,
        history: &[MessageRecord],
    ) -> Result<Option<String>, GenerateError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    chat_id: i64,
    new_message: &'a MessageRecord,
    history: &'a [MessageRecord],
}

#[derive(Deserialize)]
struct GenerateResponse {
    response_text: Option<String>,
}

/// [`ReplyGenerator`] over HTTP: POSTs `{chat_id, new_message, history}` to a
/// fixed endpoint and expects `{response_text: string | null}` back.
pub struct HttpReplyGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpReplyGenerator {
    /// Builds a client with the given endpoint and per-request timeout.
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ReplyGenerator for HttpReplyGenerator {
    async fn generate(
        &self,
        chat_id: i64,
        new_message: &MessageRecord,
        history: &[MessageRecord],
    ) -> Result<Option<String>, GenerateError> {
        let request = GenerateRequest {
            chat_id,
            new_message,
            history,
        };

        debug!(chat_id, history_len = history.len(), url = %self.url, "calling backend");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    GenerateError::NoResponse(e.to_string())
                } else {
                    GenerateError::Other(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::ErrorStatus(status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;

        // Empty string means decline, same as null.
        Ok(body.response_text.filter(|text| !text.is_empty()))
    }
}
