use std::sync::{Arc, Mutex};

use ai_llm_service::{AiLlmError, HttpError, ProviderErrorKind, TextGenerator};
use api::{AppState, MISSING_QUESTION, build_router};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use contextor::{CONTRACT_CLAUSES, StaticContextProvider};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

/// Answers with a fixed string and records every prompt it receives.
struct ScriptedGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Fails every call the way an exhausted quota does.
struct QuotaExceeded;

#[async_trait]
impl TextGenerator for QuotaExceeded {
    async fn generate(&self, _prompt: &str) -> Result<String, AiLlmError> {
        Err(ProviderErrorKind::HttpStatus(HttpError {
            status: StatusCode::TOO_MANY_REQUESTS,
            url: "https://api.openai.com/v1/chat/completions".into(),
            snippet: "quota exceeded".into(),
        })
        .into())
    }

    fn model(&self) -> &str {
        "quota"
    }
}

fn app_with(generator: Arc<dyn TextGenerator>) -> Router {
    build_router(AppState::new(
        Arc::new(StaticContextProvider::default()),
        generator,
    ))
}

async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, String, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, content_type, json)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let (status, _, json) = post_raw(app, "/process_rag_query", body.to_string()).await;
    (status, json)
}

#[tokio::test]
async fn answers_with_first_two_clauses() {
    let generator = ScriptedGenerator::new("  Payment is due net-30 from the invoice date.\n");
    let app = app_with(generator.clone());

    let (status, body) = post_json(
        app,
        json!({ "question": "When is payment due?", "top_k": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "question": "When is payment due?",
            "context_used": [CONTRACT_CLAUSES[0], CONTRACT_CLAUSES[1]],
            "answer": "Payment is due net-30 from the invoice date.",
        })
    );

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(&format!(
        "Context:\n{}\n\n{}\n\nQuestion:\nWhen is payment due?\n\nAnswer:",
        CONTRACT_CLAUSES[0], CONTRACT_CLAUSES[1]
    )));
}

#[tokio::test]
async fn empty_body_object_is_rejected_with_exact_message() {
    let generator = ScriptedGenerator::new("unused");
    let (status, content_type, body) =
        post_raw(app_with(generator.clone()), "/process_rag_query", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, json!({ "error": MISSING_QUESTION }));
    assert_eq!(body["error"], "Missing 'question' in request body.");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn empty_or_null_question_is_rejected() {
    for payload in [
        json!({ "question": "" }),
        json!({ "question": null, "top_k": 1 }),
        json!({ "top_k": 3 }),
    ] {
        let (status, body) = post_json(app_with(ScriptedGenerator::new("x")), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_QUESTION }));
    }
}

#[tokio::test]
async fn context_length_is_min_of_top_k_and_pool() {
    for (top_k, expected) in [(json!(0), 0usize), (json!(1), 1), (json!(3), 3), (json!(10), 3)] {
        let (status, body) = post_json(
            app_with(ScriptedGenerator::new("ok")),
            json!({ "question": "q", "top_k": top_k }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let used = body["context_used"].as_array().unwrap();
        assert_eq!(used.len(), expected);
        for (i, passage) in used.iter().enumerate() {
            assert_eq!(passage, CONTRACT_CLAUSES[i]);
        }
    }
}

#[tokio::test]
async fn top_k_defaults_to_three() {
    let (status, body) =
        post_json(app_with(ScriptedGenerator::new("ok")), json!({ "question": "q" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context_used"], json!(CONTRACT_CLAUSES));
}

#[tokio::test]
async fn integer_like_top_k_is_coerced() {
    let (status, body) = post_json(
        app_with(ScriptedGenerator::new("ok")),
        json!({ "question": "q", "top_k": "2" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context_used"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn generation_failure_returns_only_error() {
    let (status, content_type, body) = post_raw(
        app_with(Arc::new(QuotaExceeded)),
        "/process_rag_query",
        json!({ "question": "When is payment due?" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type, "application/json");
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn malformed_json_is_a_server_error() {
    let generator = ScriptedGenerator::new("unused");
    let (status, _, body) =
        post_raw(app_with(generator.clone()), "/process_rag_query", "{\"question\": ").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn uncoercible_top_k_is_a_server_error() {
    for top_k in [json!("many"), json!(-1), json!(null)] {
        let (status, body) = post_json(
            app_with(ScriptedGenerator::new("unused")),
            json!({ "question": "q", "top_k": top_k }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("context_used").is_none());
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn repeated_requests_use_identical_context() {
    let app = app_with(ScriptedGenerator::new("same"));
    let payload = json!({ "question": "Late fees?", "top_k": 3 });

    let (_, first) = post_json(app.clone(), payload.clone()).await;
    let (_, second) = post_json(app, payload).await;

    assert_eq!(first["context_used"], second["context_used"]);
}

#[tokio::test]
async fn api_prefixed_route_is_served() {
    let (status, _, body) = post_raw(
        app_with(ScriptedGenerator::new("ok")),
        "/api/process_rag_query",
        json!({ "question": "q", "top_k": 1 }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "ok");
}

#[tokio::test]
async fn oversized_body_gets_json_error_envelope() {
    let generator = ScriptedGenerator::new("unused");
    let big_question = "a".repeat(3 * 1024 * 1024);
    let (status, content_type, body) = post_raw(
        app_with(generator.clone()),
        "/process_rag_query",
        json!({ "question": big_question, "top_k": 1 }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type, "application/json");
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj["error"].as_str().unwrap().starts_with("unreadable request body"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn falsy_question_is_rejected_as_missing() {
    for question in [json!(0), json!(false), json!([]), json!({})] {
        let (status, body) = post_json(
            app_with(ScriptedGenerator::new("unused")),
            json!({ "question": question }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "question = {question}");
        assert_eq!(body, json!({ "error": MISSING_QUESTION }));
    }
}
