// src/models/veiculo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Veiculo {
    pub id: Uuid,

    #[schema(ignore)]
    pub id_usuario: Uuid,

    #[schema(example = "ABC1D23")]
    pub placa: String,

    #[schema(example = "Onix 1.0")]
    pub modelo: String,

    pub marca: Option<String>,
    pub cor: Option<String>,
    pub ano: Option<i32>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VeiculoPayload {
    #[validate(length(min = 7, max = 8, message = "Placa inválida"))]
    pub placa: String,

    #[validate(length(min = 1, message = "required"))]
    pub modelo: String,

    pub marca: Option<String>,
    pub cor: Option<String>,

    #[validate(range(min = 1960, max = 2100, message = "Ano inválido"))]
    pub ano: Option<i32>,

    #[serde(default = "default_ativo")]
    pub ativo: bool,
}

fn default_ativo() -> bool {
    true
}
