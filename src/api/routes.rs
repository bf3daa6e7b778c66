use actix_web::{delete, get, post, web, HttpResponse, Result as WebResult};
use std::sync::MutexGuard;
use tracing::info;
use uuid::Uuid;

use crate::api::models::{SendMessageRequest, TurnResponse};
use crate::pipeline::ResponseOrchestrator;
use crate::prompts;
use crate::session::{ChatRole, SessionPool, SessionStore};

fn lock_store(pool: &SessionPool) -> WebResult<MutexGuard<'_, SessionStore>> {
    pool.lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("Session store unavailable"))
}

// --- Page ---

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../static/index.html"))
}

// --- Presets ---

#[get("/presets")]
pub async fn list_presets() -> HttpResponse {
    HttpResponse::Ok().json(prompts::presets())
}

// --- Sessions ---

#[post("")]
pub async fn create_session(pool: web::Data<SessionPool>) -> WebResult<HttpResponse> {
    let mut store = lock_store(&pool)?;
    let summary = store.create().summary();
    info!("Created session {}", summary.id);
    Ok(HttpResponse::Created().json(summary))
}

#[get("")]
pub async fn list_sessions(pool: web::Data<SessionPool>) -> WebResult<HttpResponse> {
    let store = lock_store(&pool)?;
    let summaries: Vec<_> = store.list().into_iter().map(|s| s.summary()).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

#[get("/{id}")]
pub async fn get_session(
    pool: web::Data<SessionPool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let store = lock_store(&pool)?;

    match store.get(id.into_inner()) {
        Some(session) => Ok(HttpResponse::Ok().json(session.summary())),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[delete("/{id}")]
pub async fn delete_session(
    pool: web::Data<SessionPool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let mut store = lock_store(&pool)?;

    if store.delete(id.into_inner()) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

// --- Messages ---

#[post("/{id}/messages")]
pub async fn send_message(
    pool: web::Data<SessionPool>,
    orchestrator: web::Data<ResponseOrchestrator>,
    id: web::Path<Uuid>,
    req: web::Json<SendMessageRequest>,
) -> WebResult<HttpResponse> {
    let id = id.into_inner();
    let req = req.into_inner();
    let content = req.content.trim();

    if content.is_empty() {
        return Ok(HttpResponse::BadRequest().body("Message content is empty"));
    }

    if !lock_store(&pool)?.contains(id) {
        return Ok(HttpResponse::NotFound().body("Session not found"));
    }

    // The store lock is released here; a turn takes up to three model calls.
    let outcome = orchestrator.run_turn(content).await;

    let mut store = lock_store(&pool)?;
    let session = match store.get_mut(id) {
        Some(session) => session,
        None => return Ok(HttpResponse::NotFound().body("Session not found")),
    };

    let response = TurnResponse {
        role: ChatRole::Assistant,
        content: outcome.reply.clone(),
        steps: outcome.trace.clone(),
    };
    session.record_turn(content, outcome);

    Ok(HttpResponse::Created().json(response))
}

#[get("/{id}/messages")]
pub async fn get_messages(
    pool: web::Data<SessionPool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let store = lock_store(&pool)?;

    match store.get(id.into_inner()) {
        Some(session) => Ok(HttpResponse::Ok().json(session.messages())),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[delete("/{id}/messages")]
pub async fn clear_messages(
    pool: web::Data<SessionPool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let mut store = lock_store(&pool)?;
    let id = id.into_inner();

    match store.get_mut(id) {
        Some(session) => {
            session.clear();
            info!("Cleared chat history for session {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[get("/{id}/steps")]
pub async fn get_steps(
    pool: web::Data<SessionPool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let store = lock_store(&pool)?;

    match store.get(id.into_inner()).and_then(|s| s.last_trace()) {
        Some(trace) => Ok(HttpResponse::Ok().json(trace)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[get("/{id}/export")]
pub async fn export_session(
    pool: web::Data<SessionPool>,
    id: web::Path<Uuid>,
) -> WebResult<HttpResponse> {
    let store = lock_store(&pool)?;
    let id = id.into_inner();

    let session = match store.get(id) {
        Some(s) => s,
        None => return Ok(HttpResponse::NotFound().finish()),
    };

    Ok(HttpResponse::Ok()
        .content_type("text/plain")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"session_{}.txt\"", id),
        ))
        .body(session.transcript()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(list_presets).service(
        web::scope("/sessions")
            .service(create_session)
            .service(list_sessions)
            .service(get_session)
            .service(delete_session)
            .service(send_message)
            .service(get_messages)
            .service(clear_messages)
            .service(get_steps)
            .service(export_session),
    );
}
