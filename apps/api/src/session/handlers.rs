//! Axum route handlers for the session flow:
//! upload → dashboard → goal → roadmap (→ regenerate | reset) → discard.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::analyze_resume;
use crate::chat::{analysis_context, chat, ChatReply};
use crate::dashboard::report::render_report;
use crate::dashboard::{render_dashboard, DashboardView};
use crate::errors::AppError;
use crate::ingest::{extract_resume_text, UploadedFile};
use crate::roadmap::{generate_roadmap, validate_career_goal};
use crate::session::Session;
use crate::state::AppState;

/// Multipart field carrying the résumé.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct SetGoalRequest {
    pub career_goal: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/v1/sessions
///
/// Accepts a multipart upload (`file`: PDF or TXT), analyzes it and opens a session.
pub async fn handle_create_session(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DashboardView>), AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        upload = Some(UploadedFile {
            filename,
            content_type,
            data,
        });
        break;
    }

    let upload = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing '{FILE_FIELD}' field in upload"))
    })?;

    let resume_text = extract_resume_text(upload).await?;
    let analysis = analyze_resume(state.llm.as_ref(), &resume_text).await?;

    let session = Session::new(resume_text, analysis);
    let view = render_dashboard(&session);
    let id = state.sessions.insert(session).await;
    info!("Session {id} created");

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(render_dashboard(&session)))
}

/// DELETE /api/v1/sessions/:id
///
/// Resets the whole flow; the analysis and roadmap are discarded.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!("Session {id} discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/goal
///
/// Sets the career goal and generates its roadmap. If generation fails the
/// goal stays set without a roadmap, so the client can regenerate or reset.
pub async fn handle_set_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetGoalRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let goal = validate_career_goal(&request.career_goal)?;

    let session = state
        .sessions
        .update(id, |s| {
            s.career_goal = Some(goal.clone());
            s.roadmap = None;
        })
        .await?;

    build_roadmap(&state, session, goal).await
}

/// DELETE /api/v1/sessions/:id/goal
pub async fn handle_reset_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let session = state.sessions.update(id, Session::reset_goal).await?;
    Ok(Json(render_dashboard(&session)))
}

/// POST /api/v1/sessions/:id/roadmap
///
/// Regenerates the roadmap for the goal already set.
pub async fn handle_regenerate_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let session = state.sessions.get(id).await?;
    let goal = session
        .career_goal
        .clone()
        .ok_or_else(|| AppError::Conflict("No career goal set for this session".to_string()))?;

    build_roadmap(&state, session, goal).await
}

/// GET /api/v1/sessions/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<String, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(render_report(&session.analysis))
}

/// POST /api/v1/sessions/:id/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let session = state.sessions.get(id).await?;
    let context = analysis_context(&session.analysis);
    let reply = chat(state.llm.as_ref(), &request.message, Some(&context)).await?;
    Ok(Json(reply))
}

/// Generates a roadmap from a session snapshot and stores it, unless the goal
/// changed while the model was working.
async fn build_roadmap(
    state: &AppState,
    session: Session,
    goal: String,
) -> Result<Json<DashboardView>, AppError> {
    let roadmap = generate_roadmap(state.llm.as_ref(), &session.resume_text, &goal).await?;

    let updated = state
        .sessions
        .update(session.id, |s| {
            if s.career_goal.as_deref() == Some(goal.as_str()) {
                s.roadmap = Some(roadmap);
            } else {
                warn!("Goal changed during roadmap generation; discarding result");
            }
        })
        .await?;

    Ok(Json(render_dashboard(&updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, Response},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::MAX_RESUME_CHARS;
    use crate::llm_client::scripted::ScriptedGenerator;
    use crate::llm_client::LlmError;
    use crate::routes::build_router;
    use crate::session::DEFAULT_SESSION_TTL_MINUTES;
    use crate::state::test_state;

    const RESUME: &str = "MARIA SOUZA\nEngenheira de Software Sênior\n\
        Experiência: 7 anos com Rust, Go e Kubernetes em fintechs.\n";

    const ANALYSIS_REPLY: &str = "```json\n{\
        \"profissao_real\": {\"titulo\": \"Engenheira de Software\", \"nivel_confianca\": \"alto\"},\
        \"nivel_senioridade\": {\"nivel\": \"Sênior\", \"anos_experiencia\": 7},\
        \"lacunas\": {\"tecnicas\": [{\"skill\": \"Terraform\", \"importancia\": \"alta\"}]},\
        \"proximo_cargo\": {\"cargo\": \"Staff Engineer\", \"prazo_estimado\": \"2 anos\"}\
        }\n```";

    const ROADMAP_REPLY: &str = "{\"objetivo_viavel\": true, \"prazo_estimado\": \"12 meses\", \
        \"etapas\": [{\"ordem\": 1, \"titulo\": \"Base\", \"prazo\": \"3 meses\"}]}";

    fn app(llm: &Arc<ScriptedGenerator>) -> Router {
        build_router(test_state(llm.clone()))
    }

    fn upload_request(filename: &str, content_type: &str, content: &str) -> Request<Body> {
        let boundary = "cvision-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/sessions")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let llm = Arc::new(
            ScriptedGenerator::new()
                .reply(ANALYSIS_REPLY)
                .reply(ROADMAP_REPLY)
                .reply("{\"objetivo_viavel\": false, \"etapas\": []}")
                .reply("Foque em arquitetura."),
        );
        let app = app(&llm);

        // Upload and analyze
        let response = app
            .clone()
            .oneshot(upload_request("cv.txt", "text/plain", RESUME))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let dashboard = body_json(response).await;
        let id = dashboard["session_id"].as_str().unwrap().to_string();
        assert_eq!(dashboard["analysis"]["cards"][1]["value"], "Sênior");
        assert_eq!(dashboard["analysis"]["cards"][1]["caption"], "7 anos");
        assert_eq!(dashboard["analysis"]["skills_radar"]["values"], json!([3]));
        assert!(dashboard["roadmap"].is_null());

        // Set goal → roadmap
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/sessions/{id}/goal"),
                json!({"career_goal": "Staff Engineer"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let dashboard = body_json(response).await;
        assert_eq!(dashboard["career_goal"], "Staff Engineer");
        assert_eq!(dashboard["roadmap"]["viability"]["value"], "✓ VIÁVEL");
        assert!(dashboard["roadmap"]["phases"][0]["expanded"].as_bool().unwrap());

        // Regenerate
        let response = app
            .clone()
            .oneshot(empty_request("POST", &format!("/api/v1/sessions/{id}/roadmap")))
            .await
            .unwrap();
        let dashboard = body_json(response).await;
        assert_eq!(dashboard["roadmap"]["viability"]["value"], "⚠ DESAFIADOR");
        assert_eq!(
            dashboard["roadmap"]["notice"],
            "Nenhuma etapa foi gerada no roadmap"
        );

        // Chat with analysis context
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/chat"),
                json!({"message": "O que estudar primeiro?"}),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["reply"], "Foque em arquitetura.");
        assert!(llm
            .last_prompt()
            .unwrap()
            .contains("Profissão: Engenheira de Software"));

        // Report
        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{id}/report")))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("   Nível: Sênior"));

        // Reset goal
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/v1/sessions/{id}/goal")))
            .await
            .unwrap();
        let dashboard = body_json(response).await;
        assert!(dashboard["career_goal"].is_null());
        assert!(dashboard["roadmap"].is_null());

        // Discard
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/v1/sessions/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = app
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert_eq!(
            llm.profiles(),
            vec!["analysis", "roadmap", "roadmap", "chat"]
        );
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_model_call() {
        let llm = Arc::new(ScriptedGenerator::new().reply(ANALYSIS_REPLY));
        let content = "a".repeat(MAX_RESUME_CHARS + 1);

        let response = app(&llm)
            .oneshot(upload_request("cv.txt", "text/plain", &content))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_file_type_rejected() {
        let llm = Arc::new(ScriptedGenerator::new());

        let response = app(&llm)
            .oneshot(upload_request("cv.docx", "application/msword", RESUME))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_analysis_reply_is_bad_gateway() {
        let llm = Arc::new(ScriptedGenerator::new().reply("Aqui está sua análise!"));

        let response = app(&llm)
            .oneshot(upload_request("cv.txt", "text/plain", RESUME))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "MALFORMED_OUTPUT");
    }

    #[tokio::test]
    async fn test_failed_roadmap_keeps_goal_without_roadmap() {
        let llm = Arc::new(
            ScriptedGenerator::new()
                .reply(ANALYSIS_REPLY)
                .fail(LlmError::Exhausted {
                    attempted: vec!["gemini-2.5-flash".into(), "gemini-pro".into()],
                }),
        );
        let app = app(&llm);

        let response = app
            .clone()
            .oneshot(upload_request("cv.txt", "text/plain", RESUME))
            .await
            .unwrap();
        let id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/sessions/{id}/goal"),
                json!({"career_goal": "CTO"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = app
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{id}")))
            .await
            .unwrap();
        let dashboard = body_json(response).await;
        assert_eq!(dashboard["career_goal"], "CTO");
        assert!(dashboard["roadmap"].is_null());
    }

    #[tokio::test]
    async fn test_regenerate_without_goal_is_conflict() {
        let llm = Arc::new(ScriptedGenerator::new().reply(ANALYSIS_REPLY));
        let app = app(&llm);

        let response = app
            .clone()
            .oneshot(upload_request("cv.txt", "text/plain", RESUME))
            .await
            .unwrap();
        let id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(empty_request("POST", &format!("/api/v1/sessions/{id}/roadmap")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_goal_rejected() {
        let llm = Arc::new(ScriptedGenerator::new().reply(ANALYSIS_REPLY));
        let app = app(&llm);

        let response = app
            .clone()
            .oneshot(upload_request("cv.txt", "text/plain", RESUME))
            .await
            .unwrap();
        let id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/sessions/{id}/goal"),
                json!({"career_goal": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_found() {
        let llm = Arc::new(ScriptedGenerator::new());
        let state = test_state(llm.clone());
        let mut stale = Session::new(RESUME.to_string(), Default::default());
        stale.created_at =
            chrono::Utc::now() - chrono::Duration::minutes(DEFAULT_SESSION_TTL_MINUTES + 1);
        let id = state.sessions.insert(stale).await;
        let app = build_router(state);

        for (method, uri) in [
            ("GET", format!("/api/v1/sessions/{id}")),
            ("GET", format!("/api/v1/sessions/{id}/report")),
            ("POST", format!("/api/v1/sessions/{id}/roadmap")),
        ] {
            let response = app
                .clone()
                .oneshot(empty_request(method, &uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        }
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let llm = Arc::new(ScriptedGenerator::new());

        let response = app(&llm)
            .oneshot(empty_request(
                "GET",
                &format!("/api/v1/sessions/{}/report", Uuid::new_v4()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
