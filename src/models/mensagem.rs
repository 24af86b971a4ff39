// src/models/mensagem.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Modelo de mensagem de lembrete, enviado em sequência pelo despachante
// externo (1º lembrete às 20:00, depois de meia em meia hora).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MensagemTemplate {
    pub id: Uuid,

    #[schema(ignore)]
    pub id_usuario: Uuid,

    pub ordem: i32,

    #[schema(example = "1º Lembrete (20:00)")]
    pub titulo: String,

    #[schema(example = "Sua cobrança do aluguel de HOJE foi gerada.")]
    pub conteudo: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItemPayload {
    #[validate(range(min = 1, max = 20, message = "Ordem inválida"))]
    pub ordem: i32,

    #[validate(length(min = 1, message = "required"))]
    pub titulo: String,

    #[validate(length(min = 1, message = "required"))]
    pub conteudo: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalvarTemplatesPayload {
    #[validate(nested)]
    pub templates: Vec<TemplateItemPayload>,
}
