// src/handlers/admin.rs
//
// Rotas /api/admin: protegidas pelo `admin_middleware` além do guard de
// autenticação.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::Usuario};

// GET /api/admin/usuarios
#[utoipa::path(
    get,
    path = "/api/admin/usuarios",
    tag = "Admin",
    responses(
        (status = 200, description = "Todos os usuários da plataforma", body = Vec<Usuario>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_usuarios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let usuarios = app_state.auth_service.listar_usuarios().await?;
    Ok(Json(usuarios))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtivoPayload {
    pub ativo: bool,
}

// PATCH /api/admin/usuarios/{id}/status
#[utoipa::path(
    patch,
    path = "/api/admin/usuarios/{id}/status",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = AtivoPayload,
    responses(
        (status = 200, description = "Conta ativada/desativada", body = Usuario),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_ativo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtivoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state.auth_service.definir_ativo(id, payload.ativo).await?;
    Ok(Json(usuario))
}

// DELETE /api/admin/usuarios/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/usuarios/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário excluído"),
        (status = 403, description = "Apenas administradores"),
        (status = 409, description = "Exclusão bloqueada por registros vinculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_usuario(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.auth_service.excluir_usuario(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
