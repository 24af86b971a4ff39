// src/handlers/contratos.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        contrato::{Contrato, ContratoDetalhe, ContratoPayload, StatusContrato},
        veiculo::Veiculo,
    },
};

// POST /api/contratos
#[utoipa::path(
    post,
    path = "/api/contratos",
    tag = "Contratos",
    request_body = ContratoPayload,
    responses(
        (status = 201, description = "Contrato criado com a primeira fatura", body = Contrato),
        (status = 400, description = "Recorrência ou valor inválido"),
        (status = 404, description = "Locatário ou veículo não encontrado"),
        (status = 409, description = "Veículo já possui contrato ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<ContratoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contrato = app_state.contrato_service.criar(usuario.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(contrato)))
}

// GET /api/contratos
#[utoipa::path(
    get,
    path = "/api/contratos",
    tag = "Contratos",
    responses((status = 200, description = "Lista de contratos", body = Vec<ContratoDetalhe>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let contratos = app_state.contrato_service.listar(usuario.id).await?;
    Ok(Json(contratos))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DisponiveisQuery {
    // Na edição, o veículo deste contrato continua oferecível
    pub contrato: Option<Uuid>,
}

// GET /api/contratos/veiculos-disponiveis
#[utoipa::path(
    get,
    path = "/api/contratos/veiculos-disponiveis",
    tag = "Contratos",
    params(DisponiveisQuery),
    responses((status = 200, description = "Veículos sem contrato ativo", body = Vec<Veiculo>)),
    security(("api_jwt" = []))
)]
pub async fn veiculos_disponiveis(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Query(query): Query<DisponiveisQuery>,
) -> Result<impl IntoResponse, AppError> {
    let veiculos = app_state
        .contrato_service
        .veiculos_disponiveis(usuario.id, query.contrato)
        .await?;
    Ok(Json(veiculos))
}

// GET /api/contratos/{id}
#[utoipa::path(
    get,
    path = "/api/contratos/{id}",
    tag = "Contratos",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 200, description = "Contrato", body = Contrato),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_id(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let contrato = app_state.contrato_service.buscar(usuario.id, id).await?;
    Ok(Json(contrato))
}

// PUT /api/contratos/{id}
#[utoipa::path(
    put,
    path = "/api/contratos/{id}",
    tag = "Contratos",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    request_body = ContratoPayload,
    responses(
        (status = 200, description = "Contrato atualizado", body = Contrato),
        (status = 400, description = "Recorrência ou valor inválido"),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Veículo já possui contrato ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContratoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contrato = app_state.contrato_service.atualizar(usuario.id, id, &payload).await?;
    Ok(Json(contrato))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub status: StatusContrato,
}

// PATCH /api/contratos/{id}/status
#[utoipa::path(
    patch,
    path = "/api/contratos/{id}/status",
    tag = "Contratos",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Contrato),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Veículo já possui contrato ativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let contrato = app_state
        .contrato_service
        .definir_status(usuario.id, id, payload.status)
        .await?;
    Ok(Json(contrato))
}

// DELETE /api/contratos/{id}
#[utoipa::path(
    delete,
    path = "/api/contratos/{id}",
    tag = "Contratos",
    params(("id" = Uuid, Path, description = "ID do contrato")),
    responses(
        (status = 204, description = "Contrato excluído"),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Exclusão bloqueada por cobranças vinculadas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contrato_service.excluir(usuario.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
