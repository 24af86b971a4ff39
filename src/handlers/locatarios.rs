// src/handlers/locatarios.rs

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
    models::locatario::{Locatario, LocatarioPayload},
};

// POST /api/locatarios
#[utoipa::path(
    post,
    path = "/api/locatarios",
    tag = "Locatários",
    request_body = LocatarioPayload,
    responses(
        (status = 201, description = "Locatário criado", body = Locatario),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF ou WhatsApp já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<LocatarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let locatario = app_state.locatario_service.criar(usuario.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(locatario)))
}

// GET /api/locatarios
#[utoipa::path(
    get,
    path = "/api/locatarios",
    tag = "Locatários",
    responses((status = 200, description = "Lista de locatários", body = Vec<Locatario>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let locatarios = app_state.locatario_service.listar(usuario.id).await?;
    Ok(Json(locatarios))
}

// GET /api/locatarios/{id}
#[utoipa::path(
    get,
    path = "/api/locatarios/{id}",
    tag = "Locatários",
    params(("id" = Uuid, Path, description = "ID do locatário")),
    responses(
        (status = 200, description = "Locatário", body = Locatario),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_id(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let locatario = app_state.locatario_service.buscar(usuario.id, id).await?;
    Ok(Json(locatario))
}

// PUT /api/locatarios/{id}
#[utoipa::path(
    put,
    path = "/api/locatarios/{id}",
    tag = "Locatários",
    params(("id" = Uuid, Path, description = "ID do locatário")),
    request_body = LocatarioPayload,
    responses(
        (status = 200, description = "Locatário atualizado", body = Locatario),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "CPF ou WhatsApp já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<LocatarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let locatario = app_state.locatario_service.atualizar(usuario.id, id, &payload).await?;
    Ok(Json(locatario))
}

// DELETE /api/locatarios/{id}
#[utoipa::path(
    delete,
    path = "/api/locatarios/{id}",
    tag = "Locatários",
    params(("id" = Uuid, Path, description = "ID do locatário")),
    responses(
        (status = 204, description = "Locatário excluído"),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Exclusão bloqueada por registros vinculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.locatario_service.excluir(usuario.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
