// src/handlers/triagem.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::candidato::{AtualizarStatusCandidatoPayload, Candidato, CandidatoPayload},
};

// POST /api/triagem
#[utoipa::path(
    post,
    path = "/api/triagem",
    tag = "Triagem",
    request_body = CandidatoPayload,
    responses(
        (status = 201, description = "Candidato registrado", body = Candidato),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CandidatoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let candidato = app_state.candidato_service.criar(usuario.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(candidato)))
}

// GET /api/triagem
#[utoipa::path(
    get,
    path = "/api/triagem",
    tag = "Triagem",
    responses((status = 200, description = "Fila de candidatos por score", body = Vec<Candidato>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let candidatos = app_state.candidato_service.listar(usuario.id).await?;
    Ok(Json(candidatos))
}

// PATCH /api/triagem/{id}/status
#[utoipa::path(
    patch,
    path = "/api/triagem/{id}/status",
    tag = "Triagem",
    params(("id" = Uuid, Path, description = "ID do candidato")),
    request_body = AtualizarStatusCandidatoPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Candidato),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarStatusCandidatoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let candidato = app_state
        .candidato_service
        .atualizar_status(usuario.id, id, &payload)
        .await?;
    Ok(Json(candidato))
}

// DELETE /api/triagem/{id}
#[utoipa::path(
    delete,
    path = "/api/triagem/{id}",
    tag = "Triagem",
    params(("id" = Uuid, Path, description = "ID do candidato")),
    responses(
        (status = 204, description = "Candidato excluído"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.candidato_service.excluir(usuario.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
