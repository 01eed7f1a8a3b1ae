//! HTTP transport for the Content Lake API.

use std::sync::Arc;

use async_stream::stream;
use futures::Stream;
use peony_core::Order;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use super::SanityError;
use crate::config::SanityConfig;

/// Content Lake API client.
///
/// Cheaply cloneable; all clones share one connection pool. The token is
/// attached as a default header, so every call is authenticated.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    /// `https://{project}.api.sanity.io/v{version}`
    base_url: String,
    dataset: String,
}

/// Envelope around every query response.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// Error envelope returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

/// Result of a committed mutation transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResult {
    /// Transaction id assigned by the store.
    pub transaction_id: String,
    /// Per-document outcome.
    #[serde(default)]
    pub results: Vec<CommitResultEntry>,
}

/// One document touched by a mutation transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitResultEntry {
    /// Document id.
    pub id: String,
    /// Operation applied ("update", "create", ...).
    #[serde(default)]
    pub operation: Option<String>,
}

// =============================================================================
// Listen events
// =============================================================================

/// How a document moved relative to the tracked query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// A new document entered the window.
    Appear,
    /// A document already in the window changed.
    Update,
    /// A document left the window.
    Disappear,
}

/// A mutation event from the change feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationEvent {
    /// Window transition for the affected document.
    pub transition: Transition,
    /// Id of the affected document.
    pub document_id: String,
    /// The full resulting document, when `includeResult` was requested.
    #[serde(default)]
    pub result: Option<Order>,
}

/// One event from the listen stream.
#[derive(Debug, Clone)]
pub enum ListenEvent {
    /// Handshake; the subscription is established.
    Welcome,
    /// A document mutation within the tracked window.
    Mutation(MutationEvent),
    /// The server reported a subscription problem in-band.
    ChannelError {
        /// Server-supplied description.
        message: String,
    },
}

impl SanityClient {
    /// Create a new client.
    ///
    /// # Panics
    ///
    /// Panics if the API token contains invalid header characters.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.token.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).expect("Invalid API token for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(SanityClientInner {
                client,
                base_url: format!(
                    "https://{}.api.sanity.io/v{}",
                    config.project_id, config.api_version
                ),
                dataset: config.dataset.clone(),
            }),
        }
    }

    /// Run a GROQ query and deserialize its `result`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects the query,
    /// or the result does not match `T`.
    #[instrument(skip(self, query))]
    pub async fn fetch<T: DeserializeOwned>(&self, query: &str) -> Result<T, SanityError> {
        let url = format!(
            "{}/data/query/{}?query={}",
            self.inner.base_url,
            self.inner.dataset,
            urlencoding::encode(query)
        );

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        let body = response.text().await?;
        let envelope: QueryResponse<T> = serde_json::from_str(&body)
            .map_err(|e| SanityError::Parse(format!("query response: {e}")))?;
        envelope
            .result
            .ok_or_else(|| SanityError::Parse("query response missing result".to_string()))
    }

    /// Commit a mutation transaction (atomic per document).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the
    /// mutations; a successful return means the transaction committed.
    #[instrument(skip(self, mutations))]
    pub async fn mutate(
        &self,
        mutations: Vec<serde_json::Value>,
    ) -> Result<CommitResult, SanityError> {
        let url = format!(
            "{}/data/mutate/{}?returnIds=true",
            self.inner.base_url, self.inner.dataset
        );

        let response = self
            .inner
            .client
            .post(&url)
            .json(&serde_json::json!({ "mutations": mutations }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SanityError::Parse(format!("commit result: {e}")))
    }

    /// Open the change feed for a GROQ query.
    ///
    /// The full resulting document is requested with each event. Stream
    /// problems, including a rejected subscription request, are yielded
    /// in-band as `Err` items rather than tearing the stream down
    /// silently; the stream ends when the server closes the connection.
    /// No reconnection is attempted here.
    pub fn listen(
        &self,
        query: &str,
    ) -> impl Stream<Item = Result<ListenEvent, SanityError>> + use<> {
        let url = format!(
            "{}/data/listen/{}?query={}&includeResult=true",
            self.inner.base_url,
            self.inner.dataset,
            urlencoding::encode(query)
        );
        let client = self.inner.client.clone();

        stream! {
            use futures::StreamExt;

            let request = client
                .get(&url)
                .header(ACCEPT, HeaderValue::from_static("text/event-stream"));
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    yield Err(SanityError::Http(e));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                yield Err(error_from_response(status, response).await);
                return;
            }

            let mut buffer = String::new();
            let mut byte_stream = std::pin::pin!(response.bytes_stream());

            while let Some(chunk_result) = byte_stream.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        let text = match std::str::from_utf8(&chunk) {
                            Ok(t) => t,
                            Err(e) => {
                                yield Err(SanityError::Parse(format!("Invalid UTF-8: {e}")));
                                continue;
                            }
                        };

                        buffer.push_str(text);

                        while let Some(frame) = extract_sse_frame(&mut buffer) {
                            if let Some(event) = parse_listen_frame(&frame) {
                                yield event;
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(SanityError::Stream(e.to_string()));
                    }
                }
            }
        }
    }

    /// Cheap connectivity probe for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unreachable or rejects the token.
    pub async fn ping(&self) -> Result<(), SanityError> {
        self.fetch::<u64>("count(*[_type == \"order\"])").await.map(|_| ())
    }
}

/// Map an error response body to a `SanityError`.
async fn error_from_response(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> SanityError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return SanityError::RateLimited(retry_after);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
        |_| body.trim().to_string(),
        |api| {
            api.error
                .description
                .or(api.error.error_type)
                .unwrap_or_else(|| "unknown error".to_string())
        },
    );

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return SanityError::Unauthorized(message);
    }

    SanityError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Extract one complete SSE frame from the buffer.
///
/// Frames are separated by a blank line. Returns `None` until a full
/// frame has accumulated.
fn extract_sse_frame(buffer: &mut String) -> Option<String> {
    buffer.find("\n\n").map(|idx| {
        let frame = buffer[..idx].to_string();
        *buffer = buffer[idx + 2..].to_string();
        frame
    })
}

/// Parse one SSE frame into a listen event.
///
/// Unlike a generic SSE consumer, the event name matters here: the feed
/// multiplexes `welcome`, `mutation` and `channelError` frames over one
/// connection. Heartbeat and unrecognized frames yield nothing.
fn parse_listen_frame(frame: &str) -> Option<Result<ListenEvent, SanityError>> {
    if frame.trim().is_empty() {
        return None;
    }

    let mut event_name = None;
    let mut data_line = None;

    for line in frame.lines() {
        if let Some(stripped) = line.strip_prefix("event: ") {
            event_name = Some(stripped.trim());
        } else if let Some(stripped) = line.strip_prefix("data: ") {
            data_line = Some(stripped);
        }
    }

    match event_name? {
        "welcome" => Some(Ok(ListenEvent::Welcome)),
        "mutation" => {
            let data = data_line?;
            match serde_json::from_str::<MutationEvent>(data) {
                Ok(event) => Some(Ok(ListenEvent::Mutation(event))),
                Err(e) => Some(Err(SanityError::Parse(format!("mutation event: {e}")))),
            }
        }
        "channelError" => {
            let message = data_line
                .and_then(|data| serde_json::from_str::<ApiErrorResponse>(data).ok())
                .and_then(|api| api.error.description)
                .unwrap_or_else(|| data_line.unwrap_or("channel error").to_string());
            Some(Ok(ListenEvent::ChannelError { message }))
        }
        // disconnect, heartbeats, and future event kinds
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sse_frame() {
        let mut buffer =
            "event: welcome\ndata: {}\n\nevent: mutation\ndata: {\"transition\"".to_string();

        let first = extract_sse_frame(&mut buffer).expect("complete frame");
        assert!(first.contains("welcome"));

        // Second frame is still incomplete
        assert!(extract_sse_frame(&mut buffer).is_none());
        assert!(buffer.starts_with("event: mutation"));
    }

    #[test]
    fn test_parse_welcome_frame() {
        let event = parse_listen_frame("event: welcome\ndata: {\"listenerName\":\"x\"}")
            .expect("welcome is an event")
            .expect("welcome is not an error");
        assert!(matches!(event, ListenEvent::Welcome));
    }

    #[test]
    fn test_parse_mutation_appear_frame() {
        let frame = concat!(
            "event: mutation\n",
            "data: {\"transition\":\"appear\",\"documentId\":\"order-1\",",
            "\"result\":{\"_id\":\"order-1\",\"customerName\":\"Nadia\",",
            "\"status\":\"pending\",\"paymentStatus\":\"pending\",",
            "\"deliveryStatus\":\"pending\",\"totalPrice\":120,",
            "\"orderDate\":\"2026-08-21T09:30:00Z\"}}"
        );
        let event = parse_listen_frame(frame)
            .expect("mutation is an event")
            .expect("valid mutation payload");
        let ListenEvent::Mutation(mutation) = event else {
            panic!("expected mutation event");
        };
        assert_eq!(mutation.transition, Transition::Appear);
        assert_eq!(mutation.document_id, "order-1");
        let order = mutation.result.expect("result included");
        assert_eq!(order.customer_name, "Nadia");
    }

    #[test]
    fn test_parse_mutation_without_result() {
        let frame = "event: mutation\ndata: {\"transition\":\"disappear\",\"documentId\":\"order-9\"}";
        let event = parse_listen_frame(frame)
            .expect("mutation is an event")
            .expect("valid payload");
        let ListenEvent::Mutation(mutation) = event else {
            panic!("expected mutation event");
        };
        assert_eq!(mutation.transition, Transition::Disappear);
        assert!(mutation.result.is_none());
    }

    #[test]
    fn test_unnamed_frames_are_skipped() {
        assert!(parse_listen_frame(": heartbeat").is_none());
        assert!(parse_listen_frame("event: disconnect\ndata: {}").is_none());
    }

    #[test]
    fn test_commit_result_deserializes() {
        let body = r#"{"transactionId":"tx-1","results":[{"id":"order-1","operation":"update"}]}"#;
        let commit: CommitResult = serde_json::from_str(body).expect("valid commit result");
        assert_eq!(commit.transaction_id, "tx-1");
        assert_eq!(commit.results.len(), 1);
        assert_eq!(commit.results[0].operation.as_deref(), Some("update"));
    }
}
