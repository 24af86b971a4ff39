// src/models/locatario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_documento", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoDocumento {
    Cpf,
    Cnpj,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Locatario {
    pub id: Uuid,

    #[schema(ignore)]
    pub id_usuario: Uuid,

    #[schema(example = "Maria da Silva")]
    pub nome_completo: String,

    // Sempre persistido só com dígitos, formato 55DDD9XXXXXXXX
    #[schema(example = "5511992294869")]
    pub whatsapp: String,

    pub email: Option<String>,
    pub documento: TipoDocumento,

    #[schema(example = "12345678900")]
    pub cpf: String,

    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,

    pub ativo: bool,

    // Token opaco de acesso ao Portal do Locatário
    pub portal_token: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocatarioPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub nome_completo: String,

    #[validate(length(min = 10, message = "WhatsApp inválido"))]
    pub whatsapp: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub documento: TipoDocumento,

    #[validate(length(min = 11, message = "Documento inválido"))]
    pub cpf: String,

    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,

    #[validate(length(equal = 2, message = "UF deve ter 2 letras"))]
    pub estado: Option<String>,

    #[serde(default = "default_ativo")]
    pub ativo: bool,
}

fn default_ativo() -> bool {
    true
}
