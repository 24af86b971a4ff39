// src/handlers/portal.rs
//
// Única rota pública além do auth: o locatário acessa pelo link opaco
// que recebeu no WhatsApp, sem senha.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError, config::AppState, services::locatario_service::PortalView,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PortalQuery {
    // Recorte opcional do histórico por vencimento
    pub de: Option<NaiveDate>,
    pub ate: Option<NaiveDate>,
}

// GET /api/portal/{token}
#[utoipa::path(
    get,
    path = "/api/portal/{token}",
    tag = "Portal",
    params(
        ("token" = String, Path, description = "Token opaco do portal"),
        PortalQuery
    ),
    responses(
        (status = 200, description = "Dados do locatário e suas faturas", body = PortalView),
        (status = 404, description = "Link de acesso inválido")
    )
)]
pub async fn portal(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<PortalQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.locatario_service.portal(&token, query.de, query.ate).await?;
    Ok(Json(view))
}
