//! Axum route handlers for the AI endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ai::envelope::{success, upstream_failure, SuccessEnvelope};
use crate::ai::profiles::{TaskProfile, FIX_GRAMMAR, RESUME_OPTIMIZE, REWRITE};
use crate::ai::prompts::compose_messages;
use crate::ai::validation::{estimate_tokens, too_long, validate_text};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/ai/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessEnvelope>, AppError> {
    run_task(&state, &REWRITE, body).await
}

/// POST /api/ai/fix-grammar
pub async fn handle_fix_grammar(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessEnvelope>, AppError> {
    run_task(&state, &FIX_GRAMMAR, body).await
}

/// POST /api/ai/resume-optimize
pub async fn handle_resume_optimize(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessEnvelope>, AppError> {
    run_task(&state, &RESUME_OPTIMIZE, body).await
}

async fn run_task(
    state: &AppState,
    profile: &TaskProfile,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessEnvelope>, AppError> {
    process(state, profile, body)
        .await
        .map(Json)
        .map_err(|e| e.redact(state.config.production))
}

/// Full pipeline for one request: validate → compose → complete → envelope.
/// Validation failures return before the completion service is touched.
async fn process(
    state: &AppState,
    profile: &TaskProfile,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<SuccessEnvelope, AppError> {
    let Json(body) = body.map_err(|rejection| {
        debug!("Unreadable {} request body: {rejection}", profile.name);
        // Bodies over the extractor's byte limit are far past any max_len
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_long(profile)
        } else {
            AppError::invalid_input(profile.messages.missing_text)
        }
    })?;

    let text = validate_text(&body, profile)?;
    let messages = compose_messages(profile, text);

    let completion = state
        .llm
        .complete(&messages, &profile.sampling)
        .await
        .map_err(|e| {
            warn!(
                task = profile.name,
                kind = %e.kind(),
                status = ?e.status(),
                "Completion failed: {e}"
            );
            upstream_failure(profile, &e)
        })?;

    let envelope = success(profile, text, completion).inspect_err(|e| {
        warn!(task = profile.name, kind = %e.kind, "Completion returned no text");
    })?;

    info!(
        event = profile.event,
        model = state.llm.model(),
        input_length = envelope.metadata.input_length,
        output_length = envelope.metadata.output_length,
        estimated_input_tokens = estimate_tokens(text),
        total_tokens = ?envelope.metadata.tokens_used,
        response_time_ms = envelope.metadata.processing_time,
        "AI task completed"
    );

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::{
        ChatMessage, CompletionResult, CompletionService, LlmError, Role, SamplingParams,
    };
    use crate::routes::build_router;
    use crate::state::AppState;

    enum Reply {
        Text(&'static str),
        Api {
            status: u16,
            code: Option<&'static str>,
            message: &'static str,
        },
        Timeout,
    }

    /// Counts invocations and records the last request it saw.
    struct MockCompletion {
        reply: Reply,
        calls: AtomicUsize,
        last_messages: Mutex<Vec<ChatMessage>>,
        last_params: Mutex<Option<SamplingParams>>,
    }

    impl MockCompletion {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
                last_params: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for MockCompletion {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            params: &SamplingParams,
        ) -> Result<CompletionResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages.to_vec();
            *self.last_params.lock().unwrap() = Some(*params);

            match &self.reply {
                Reply::Text(text) => Ok(CompletionResult {
                    text: text.to_string(),
                    tokens_used: Some(57),
                    latency_ms: 42,
                }),
                Reply::Api {
                    status,
                    code,
                    message,
                } => Err(LlmError::Api {
                    status: *status,
                    code: code.map(str::to_string),
                    message: message.to_string(),
                }),
                Reply::Timeout => Err(LlmError::Timeout(Duration::from_secs(20))),
            }
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn app(mock: Arc<MockCompletion>, production: bool) -> Router {
        let mut config = Config::test_defaults();
        config.production = production;
        build_router(AppState { llm: mock, config })
    }

    async fn post(app: Router, path: &str, body: String) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_text(app: Router, path: &str, text: &str) -> (StatusCode, serde_json::Value) {
        post(app, path, json!({ "text": text }).to_string()).await
    }

    #[tokio::test]
    async fn test_too_short_never_calls_upstream() {
        let mock = MockCompletion::new(Reply::Text("unused"));

        for text in ["", "abcd", "   ab   ", "\n\n\t"] {
            let (status, body) =
                post_text(app(mock.clone(), false), "/api/ai/rewrite", text).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["kind"], "TooShort");
            assert_eq!(body["error"], "Text must be at least 5 characters");
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_too_long_never_calls_upstream() {
        let mock = MockCompletion::new(Reply::Text("unused"));

        let cases = [
            ("/api/ai/rewrite", 5001),
            ("/api/ai/fix-grammar", 3001),
            ("/api/ai/resume-optimize", 1001),
        ];
        for (path, len) in cases {
            let (status, body) = post_text(app(mock.clone(), false), path, &"a".repeat(len)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert_eq!(body["kind"], "TooLong", "{path}");
            assert!(body["suggestion"].as_str().is_some(), "{path}");
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_body_over_byte_limit_is_too_long() {
        let mock = MockCompletion::new(Reply::Text("unused"));

        for path in ["/api/ai/rewrite", "/api/ai/resume-optimize"] {
            let huge = "a".repeat(3 * 1024 * 1024);
            let (status, body) = post_text(app(mock.clone(), false), path, &huge).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert_eq!(body["kind"], "TooLong", "{path}");
            assert!(body["suggestion"].as_str().is_some(), "{path}");
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_token_ceiling_reports_estimate() {
        let mock = MockCompletion::new(Reply::Text("unused"));
        let (status, body) =
            post_text(app(mock.clone(), false), "/api/ai/rewrite", &"word ".repeat(900)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "TooLong");
        assert_eq!(body["estimatedTokens"], 1125);
        assert_eq!(body["maxTokens"], 1000);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_invalid_input() {
        let mock = MockCompletion::new(Reply::Text("unused"));

        let bodies = [
            "{}".to_string(),
            json!({ "text": 42 }).to_string(),
            json!({ "content": "hello world" }).to_string(),
            "not json at all".to_string(),
        ];
        for body in bodies {
            let (status, json) = post(app(mock.clone(), false), "/api/ai/fix-grammar", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["kind"], "InvalidInput");
            assert_eq!(json["error"], "Text input is required and must be a string");
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let mock = MockCompletion::new(Reply::Text("Hello world."));
        let (status, body) = post_text(
            app(mock.clone(), false),
            "/api/ai/rewrite",
            "   hello   world, this is me  \n\n",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Hello world.");
        assert_eq!(
            body["metadata"]["inputLength"],
            "hello   world, this is me".chars().count()
        );
        assert_eq!(body["metadata"]["outputLength"], 12);
        assert_eq!(body["metadata"]["processingTime"], 42);
        assert_eq!(body["metadata"]["tokensUsed"], 57);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_receives_trimmed_text_and_task_params() {
        let mock = MockCompletion::new(Reply::Text("He goes to school."));
        let (status, _) = post_text(
            app(mock.clone(), false),
            "/api/ai/fix-grammar",
            "  he go to school  ",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let messages = mock.last_messages.lock().unwrap().clone();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("\nhe go to school\n"));

        let params = mock.last_params.lock().unwrap().unwrap();
        assert_eq!(params.max_tokens, 300);
        assert_eq!(params.temperature, 0.1);
    }

    #[tokio::test]
    async fn test_blank_upstream_text_is_500() {
        let mock = MockCompletion::new(Reply::Text("  \n "));
        let (status, body) =
            post_text(app(mock.clone(), false), "/api/ai/resume-optimize", "Led the team").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "UpstreamUnavailable");
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429_with_wait_suggestion() {
        let mock = MockCompletion::new(Reply::Api {
            status: 429,
            code: Some("rate_limit_exceeded"),
            message: "Rate limit reached",
        });
        let (status, body) =
            post_text(app(mock.clone(), false), "/api/ai/rewrite", "hello world").await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["kind"], "RateLimited");
        assert!(body["suggestion"].as_str().unwrap().contains("wait"));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_auth_failure_maps_to_401() {
        let mock = MockCompletion::new(Reply::Api {
            status: 401,
            code: Some("invalid_api_key"),
            message: "Invalid API Key",
        });
        let (status, body) =
            post_text(app(mock, false), "/api/ai/fix-grammar", "hello world").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["kind"], "AuthFailure");
    }

    #[tokio::test]
    async fn test_model_complaint_maps_to_model_config_error() {
        let mock = MockCompletion::new(Reply::Api {
            status: 400,
            code: Some("model_not_found"),
            message: "The model `gone` does not exist",
        });
        let (status, body) = post_text(app(mock, false), "/api/ai/rewrite", "hello world").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "ModelConfigError");
        assert_eq!(body["error"], "Model configuration error");
    }

    #[tokio::test]
    async fn test_details_only_outside_production() {
        let (status, body) = post_text(
            app(MockCompletion::new(Reply::Timeout), false),
            "/api/ai/rewrite",
            "hello world",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Text rewriting service unavailable");
        assert!(body["details"].as_str().unwrap().contains("timed out"));

        let (status, body) = post_text(
            app(MockCompletion::new(Reply::Timeout), true),
            "/api/ai/rewrite",
            "hello world",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("details").is_none());
        assert_eq!(body["suggestion"], "Please try again in a few moments");
    }
}
