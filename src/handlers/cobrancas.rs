// src/handlers/cobrancas.rs

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
    models::cobranca::{Cobranca, CobrancaComExpiracao, LancamentoManualPayload},
};

// GET /api/cobrancas
#[utoipa::path(
    get,
    path = "/api/cobrancas",
    tag = "Cobranças",
    responses((status = 200, description = "Cobranças com contagem regressiva", body = Vec<CobrancaComExpiracao>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let cobrancas = app_state.cobranca_service.listar(usuario.id).await?;
    Ok(Json(cobrancas))
}

// POST /api/cobrancas/manual
#[utoipa::path(
    post,
    path = "/api/cobrancas/manual",
    tag = "Cobranças",
    request_body = LancamentoManualPayload,
    responses(
        (status = 201, description = "Lançamento registrado (ou fatura somada)", body = Cobranca),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Locatário ou fatura pendente não encontrados"),
        (status = 409, description = "A fatura alvo deixou de estar pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn lancamento_manual(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<LancamentoManualPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cobranca = app_state.cobranca_service.lancamento_manual(usuario.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(cobranca)))
}

// POST /api/cobrancas/{id}/baixa
#[utoipa::path(
    post,
    path = "/api/cobrancas/{id}/baixa",
    tag = "Cobranças",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 200, description = "Baixa registrada", body = Cobranca),
        (status = 404, description = "Não encontrada"),
        (status = 409, description = "Já estava paga")
    ),
    security(("api_jwt" = []))
)]
pub async fn dar_baixa(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cobranca = app_state.cobranca_service.dar_baixa(usuario.id, id).await?;
    Ok(Json(cobranca))
}

// POST /api/cobrancas/{id}/registrar-envio
#[utoipa::path(
    post,
    path = "/api/cobrancas/{id}/registrar-envio",
    tag = "Cobranças",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 200, description = "Tentativa de envio registrada", body = Cobranca),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn registrar_envio(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cobranca = app_state.cobranca_service.registrar_envio(usuario.id, id).await?;
    Ok(Json(cobranca))
}

// DELETE /api/cobrancas/{id}
#[utoipa::path(
    delete,
    path = "/api/cobrancas/{id}",
    tag = "Cobranças",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 204, description = "Cobrança excluída"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cobranca_service.excluir(usuario.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
