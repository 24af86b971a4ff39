// src/models/candidato.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Fila de triagem: candidatos a locatário ranqueados pelo score do
// formulário de captação.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidato {
    pub id: Uuid,

    #[schema(ignore)]
    pub id_usuario: Uuid,

    #[schema(example = "João Pereira")]
    pub nome: String,

    pub telefone: Option<String>,
    pub cpf: Option<String>,

    #[schema(example = 87)]
    pub score_formulario: i32,

    #[schema(example = "Pré-aprovado")]
    pub status: String,

    pub reserva_confirmada_em: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidatoPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub nome: String,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    #[serde(default)]
    pub score_formulario: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarStatusCandidatoPayload {
    // Ex: "Pré-aprovado", "Aguardando Reserva", "Reserva Confirmada", "Reprovado"
    #[validate(length(min = 1, message = "required"))]
    pub status: String,
}
