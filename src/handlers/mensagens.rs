// src/handlers/mensagens.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::mensagem::{MensagemTemplate, SalvarTemplatesPayload},
};

// GET /api/mensagens
#[utoipa::path(
    get,
    path = "/api/mensagens",
    tag = "Mensagens",
    responses((status = 200, description = "Régua de mensagens da conta", body = Vec<MensagemTemplate>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let templates = app_state.mensagem_service.listar(usuario.id).await?;
    Ok(Json(templates))
}

// PUT /api/mensagens
#[utoipa::path(
    put,
    path = "/api/mensagens",
    tag = "Mensagens",
    request_body = SalvarTemplatesPayload,
    responses(
        (status = 200, description = "Régua salva", body = Vec<MensagemTemplate>),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn save(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<SalvarTemplatesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let templates = app_state.mensagem_service.salvar(usuario.id, &payload).await?;
    Ok(Json(templates))
}
