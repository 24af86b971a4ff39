// src/handlers/veiculos.rs

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
    models::veiculo::{Veiculo, VeiculoPayload},
};

// POST /api/veiculos
#[utoipa::path(
    post,
    path = "/api/veiculos",
    tag = "Veículos",
    request_body = VeiculoPayload,
    responses(
        (status = 201, description = "Veículo criado", body = Veiculo),
        (status = 409, description = "Placa já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<VeiculoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let veiculo = app_state.veiculo_service.criar(usuario.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(veiculo)))
}

// GET /api/veiculos
#[utoipa::path(
    get,
    path = "/api/veiculos",
    tag = "Veículos",
    responses((status = 200, description = "Lista de veículos", body = Vec<Veiculo>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let veiculos = app_state.veiculo_service.listar(usuario.id).await?;
    Ok(Json(veiculos))
}

// GET /api/veiculos/{id}
#[utoipa::path(
    get,
    path = "/api/veiculos/{id}",
    tag = "Veículos",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 200, description = "Veículo", body = Veiculo),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_id(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let veiculo = app_state.veiculo_service.buscar(usuario.id, id).await?;
    Ok(Json(veiculo))
}

// PUT /api/veiculos/{id}
#[utoipa::path(
    put,
    path = "/api/veiculos/{id}",
    tag = "Veículos",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    request_body = VeiculoPayload,
    responses(
        (status = 200, description = "Veículo atualizado", body = Veiculo),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Placa já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VeiculoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let veiculo = app_state.veiculo_service.atualizar(usuario.id, id, &payload).await?;
    Ok(Json(veiculo))
}

// DELETE /api/veiculos/{id}
#[utoipa::path(
    delete,
    path = "/api/veiculos/{id}",
    tag = "Veículos",
    params(("id" = Uuid, Path, description = "ID do veículo")),
    responses(
        (status = 204, description = "Veículo excluído"),
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
    app_state.veiculo_service.excluir(usuario.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
