//! Retrying model invocation.
//!
//! Each attempt sends exactly one system and one user message and must come
//! back with a single JSON object. Retryable failures wait
//! `base_delay * (attempt + 1)` before the next attempt; fatal failures
//! return immediately.

use std::time::Duration;

use serde_json::Value as JsonValue;

use super::client::{ChatRequest, ChatTransport, Message, ResponseFormat};
use crate::config::ModelSettings;
use crate::error::ModelError;

/// Sampling temperature used for every generation request
pub const TEMPERATURE: f32 = 1.0;

/// Sends prompts through a [`ChatTransport`] with bounded retries
pub struct ModelInvoker<T> {
    transport: T,
    settings: ModelSettings,
}

impl<T: ChatTransport> ModelInvoker<T> {
    pub fn new(transport: T, settings: ModelSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke the model and return its parsed JSON object.
    ///
    /// Returns `ModelError::ExhaustedRetries` wrapping the last failure once
    /// every attempt has failed, or the fatal error itself as soon as one
    /// is seen.
    pub async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        response_format: ResponseFormat,
    ) -> Result<JsonValue, ModelError> {
        let request = ChatRequest {
            messages: vec![Message::system(system_prompt), Message::user(user_prompt)],
            max_tokens: self.settings.max_tokens,
            temperature: TEMPERATURE,
            response_format,
        };

        let max_attempts = self.settings.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..max_attempts {
            metrics::counter!("model_attempts_total").increment(1);

            let outcome = match self.transport.complete(&request).await {
                Ok(content) => parse_object(&content),
                Err(e) => Err(e),
            };

            let err = match outcome {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(attempt = attempt + 1, "Model retry succeeded");
                    }
                    return Ok(value);
                }
                Err(e) => e,
            };

            metrics::counter!(
                "model_failures_total",
                "retryable" => err.is_retryable().to_string()
            )
            .increment(1);

            if !err.is_retryable() {
                tracing::error!(attempt = attempt + 1, error = %err, "Model call failed, not retrying");
                return Err(err);
            }

            tracing::warn!(
                attempt = attempt + 1,
                max_attempts = max_attempts,
                error = %err,
                "Model call failed, retrying"
            );
            last_error = Some(err);

            if attempt + 1 < max_attempts {
                tokio::time::sleep(backoff_delay(self.settings.base_delay, attempt)).await;
            }
        }

        Err(ModelError::ExhaustedRetries {
            attempts: max_attempts,
            last: Box::new(last_error.unwrap_or(ModelError::EmptyResponse)),
        })
    }
}

/// Delay after failed attempt `attempt` (0-based)
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay * (attempt + 1)
}

/// Parse message content as a single JSON object.
fn parse_object(content: &str) -> Result<JsonValue, ModelError> {
    let text = strip_code_fence(content);
    if text.is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    let value: JsonValue =
        serde_json::from_str(text).map_err(|e| ModelError::MalformedResponse(e.to_string()))?;

    match value {
        JsonValue::Object(_) => Ok(value),
        JsonValue::Array(_) => Err(ModelError::MalformedResponse(
            "expected a JSON object, found an array".to_string(),
        )),
        JsonValue::Null => Err(ModelError::MalformedResponse(
            "expected a JSON object, found null".to_string(),
        )),
        _ => Err(ModelError::MalformedResponse(
            "expected a JSON object, found a scalar".to_string(),
        )),
    }
}

/// Unwrap content from a surrounding ```json ... ``` or ``` ... ``` fence
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    if trimmed.starts_with("```") {
        let after = trimmed.trim_start_matches("```");
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.rfind("```") {
            return after[..end].trim();
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport that replays a fixed script of responses, one per call
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<String, ModelError>>>,
        calls: AtomicUsize,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<String, ModelError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ChatTransport for ScriptedTransport {
        async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ModelError::Transport("script exhausted".into())))
        }
    }

    fn settings(max_attempts: u32) -> ModelSettings {
        ModelSettings {
            max_attempts,
            base_delay: Duration::from_millis(1000),
            max_tokens: 2048,
        }
    }

    #[test]
    fn backoff_grows_linearly() {
        let base = Duration::from_millis(1000);
        assert_eq!(backoff_delay(base, 0), Duration::from_millis(1000));
        assert_eq!(backoff_delay(base, 1), Duration::from_millis(2000));
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(3000));
    }

    #[test]
    fn parse_object_accepts_fenced_json() {
        let value = parse_object("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(value, json!({ "a": 1 }));
        let value = parse_object("  ```\n{\"b\": true}\n```  ").unwrap();
        assert_eq!(value, json!({ "b": true }));
    }

    #[test]
    fn parse_object_rejects_non_objects() {
        assert!(matches!(parse_object("   "), Err(ModelError::EmptyResponse)));
        assert!(matches!(parse_object("[1]"), Err(ModelError::MalformedResponse(_))));
        assert!(matches!(parse_object("null"), Err(ModelError::MalformedResponse(_))));
        assert!(matches!(parse_object("42"), Err(ModelError::MalformedResponse(_))));
        assert!(matches!(parse_object("{oops"), Err(ModelError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn sends_two_messages_with_fixed_temperature() {
        let transport = ScriptedTransport::new(vec![Ok("{\"ok\": true}".into())]);
        let invoker = ModelInvoker::new(transport, settings(3));

        let value = invoker
            .invoke("system text", "user text", ResponseFormat::JsonObject)
            .await
            .unwrap();
        assert_eq!(value, json!({ "ok": true }));

        let requests = invoker.transport().requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            vec![Message::system("system text"), Message::user("user text")]
        );
        assert_eq!(requests[0].temperature, 1.0);
        assert_eq!(requests[0].max_tokens, 2048);
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_transport_exhausts_after_max_attempts() {
        let transport = ScriptedTransport::new(vec![
            Err(ModelError::Transport("reset".into())),
            Ok(String::new()),
            Ok("[\"not\", \"an\", \"object\"]".into()),
        ]);
        let invoker = ModelInvoker::new(transport, settings(3));

        let start = tokio::time::Instant::now();
        let err = invoker
            .invoke("s", "u", ResponseFormat::JsonObject)
            .await
            .unwrap_err();
        let elapsed = start.elapsed();

        assert_eq!(invoker.transport().calls(), 3);
        match err {
            ModelError::ExhaustedRetries { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, ModelError::MalformedResponse(_)));
            }
            other => panic!("expected ExhaustedRetries, got {other:?}"),
        }
        // 1s after the first failure, 2s after the second, nothing after the last
        assert!(elapsed >= Duration::from_millis(3000));
        assert!(elapsed < Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failure() {
        let transport = ScriptedTransport::new(vec![
            Err(ModelError::Status {
                status: 429,
                body: "slow down".into(),
            }),
            Ok("{\"ok\": 1}".into()),
        ]);
        let invoker = ModelInvoker::new(transport, settings(3));

        let value = invoker
            .invoke("s", "u", ResponseFormat::JsonObject)
            .await
            .unwrap();
        assert_eq!(value, json!({ "ok": 1 }));
        assert_eq!(invoker.transport().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_error_short_circuits_without_backoff() {
        let transport = ScriptedTransport::new(vec![Err(ModelError::Status {
            status: 401,
            body: "invalid api key".into(),
        })]);
        let invoker = ModelInvoker::new(transport, settings(3));

        let start = tokio::time::Instant::now();
        let err = invoker
            .invoke("s", "u", ResponseFormat::JsonObject)
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::Status { status: 401, .. }));
        assert_eq!(invoker.transport().calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
