// src/models/configuracao.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::auth::Usuario;

// Visão das configurações da conta. É o único lugar em que os tokens de
// integração saem do servidor, e só para o próprio dono.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuracoes {
    pub nome_completo: Option<String>,
    pub whatsapp: Option<String>,
    pub access_token_mercado_pago: Option<String>,
    pub evolution_url: Option<String>,
    pub evolution_instance: Option<String>,
    pub evolution_apikey: Option<String>,
}

impl From<Usuario> for Configuracoes {
    fn from(u: Usuario) -> Self {
        Self {
            nome_completo: u.nome_completo,
            whatsapp: u.whatsapp,
            access_token_mercado_pago: u.access_token_mercado_pago,
            evolution_url: u.evolution_url,
            evolution_instance: u.evolution_instance,
            evolution_apikey: u.evolution_apikey,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguracoesPayload {
    pub nome_completo: Option<String>,
    pub whatsapp: Option<String>,
    pub access_token_mercado_pago: Option<String>,

    #[validate(url(message = "URL inválida"))]
    pub evolution_url: Option<String>,
    pub evolution_instance: Option<String>,
    pub evolution_apikey: Option<String>,
}

// Resultado da verificação de conexão do WhatsApp (poll limitado, nunca
// um timer implícito)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConexaoWhatsapp {
    #[schema(example = "open")]
    pub estado: String,
    pub tentativas: u32,
    pub conectado: bool,
}
