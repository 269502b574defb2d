use crate::analyzer::Analyzer;
use crate::auth::{OwnerId, TokenVerifier};
use crate::error::Error;
use crate::history::HistoryStore;
use crate::models::RecordDetail;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde::Deserialize;
use std::sync::Arc;

/// Shared per-process state: the pipeline and its gateways, constructed once
/// at startup and injected into every handler.
pub struct AppState {
    pub analyzer: Analyzer,
    pub store: Arc<dyn HistoryStore>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub keyword: String,
}

async fn analyze(
    state: web::Data<AppState>,
    owner: OwnerId,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, Error> {
    let report = state
        .analyzer
        .analyze(&body.url, &body.keyword)
        .await
        .map_err(log_failure)?;

    state
        .store
        .append(&owner.0, &body.url, &report)
        .await
        .map_err(log_failure)?;

    Ok(HttpResponse::Ok().json(report))
}

async fn analyzed_history(
    state: web::Data<AppState>,
    owner: OwnerId,
) -> Result<HttpResponse, Error> {
    let summaries = state
        .store
        .list_by_owner(&owner.0)
        .await
        .map_err(log_failure)?;

    Ok(HttpResponse::Ok().json(summaries))
}

async fn history_by_id(
    state: web::Data<AppState>,
    owner: OwnerId,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let record = state
        .store
        .get_by_id(&owner.0, &path)
        .await
        .map_err(log_failure)?;

    Ok(HttpResponse::Ok().json(RecordDetail::from(record)))
}

/// Callers get opaque responses; the structured kind and cause land in the
/// logs here, once, at the boundary.
fn log_failure(err: Error) -> Error {
    match err {
        Error::NotFound | Error::Validation(_) => {
            tracing::warn!(kind = err.kind(), error = %err, "request rejected");
        }
        _ => {
            tracing::error!(kind = err.kind(), error = %err, "analysis request failed");
        }
    }
    err
}

/// Route table, shared between the real server and the in-process test apps.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/seo")
            .route("/analyze", web::post().to(analyze))
            .route("/analyzedHistory", web::get().to(analyzed_history))
            .route("/history/{id}", web::get().to(history_by_id)),
    );
}

pub async fn serve(
    state: AppState,
    verifier: Arc<dyn TokenVerifier>,
    bind_addr: &str,
    port: u16,
) -> std::io::Result<()> {
    let state = web::Data::new(state);
    let verifier = web::Data::from(verifier);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(verifier.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
