// src/handlers/configuracoes.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::configuracao::{ConexaoWhatsapp, Configuracoes, ConfiguracoesPayload},
};

// GET /api/configuracoes
#[utoipa::path(
    get,
    path = "/api/configuracoes",
    tag = "Configurações",
    responses((status = 200, description = "Configurações da conta", body = Configuracoes)),
    security(("api_jwt" = []))
)]
pub async fn get(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let config = app_state.configuracao_service.buscar(usuario.id).await?;
    Ok(Json(config))
}

// PUT /api/configuracoes
#[utoipa::path(
    put,
    path = "/api/configuracoes",
    tag = "Configurações",
    request_body = ConfiguracoesPayload,
    responses(
        (status = 200, description = "Configurações salvas", body = Configuracoes),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn save(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<ConfiguracoesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let config = app_state.configuracao_service.salvar(usuario.id, &payload).await?;
    Ok(Json(config))
}

// POST /api/configuracoes/whatsapp/verificar
#[utoipa::path(
    post,
    path = "/api/configuracoes/whatsapp/verificar",
    tag = "Configurações",
    responses(
        (status = 200, description = "Resultado do poll de conexão", body = ConexaoWhatsapp),
        (status = 400, description = "Credenciais da Evolution não configuradas")
    ),
    security(("api_jwt" = []))
)]
pub async fn verificar_whatsapp(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let conexao = app_state
        .configuracao_service
        .verificar_conexao_whatsapp(usuario.id)
        .await?;
    Ok(Json(conexao))
}
