// src/models/cobranca.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cobranca_tipo", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoCobranca {
    Receita, // Dinheiro a receber do locatário
    Despesa, // Gasto do locador (nasce paga, é um fato e não um recebível)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cobranca_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusCobranca {
    Pendente,
    Pago,
    Atrasado,
    // Gravado apenas pelo job externo de faturamento. Para exibição, a
    // expiração é SEMPRE recalculada ao vivo contra o corte das 23:30.
    Expirado,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cobranca {
    pub id: Uuid,

    #[schema(ignore)]
    pub id_usuario: Uuid,

    // NULL = lançamento avulso, sem contrato
    pub id_contrato: Option<Uuid>,

    // Toda receita carrega o locatário (vinda de contrato ou avulsa);
    // despesa do locador fica sem
    pub id_locatario: Option<Uuid>,

    #[schema(example = "300.00")]
    pub valor: Decimal,

    pub tipo: TipoCobranca,

    #[schema(example = "aluguel")]
    pub categoria: String,

    pub status: StatusCobranca,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub data_vencimento: NaiveDate,

    pub data_pagamento: Option<DateTime<Utc>>,

    // Artefatos de pagamento, opacos (gerados pelo serviço externo de PIX)
    pub payment_link: Option<String>,
    pub mercado_pago_id: Option<String>,

    // Consumido pelo despachante de mensagens externo (lembretes 1..8)
    pub tentativas_envio: i32,

    pub created_at: DateTime<Utc>,
}

// Linha da listagem, com locatário e placa resolvidos via LEFT JOIN
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CobrancaDetalhe {
    pub id: Uuid,
    pub id_contrato: Option<Uuid>,
    pub id_locatario: Option<Uuid>,
    pub valor: Decimal,
    pub tipo: TipoCobranca,
    pub categoria: String,
    pub status: StatusCobranca,
    #[schema(value_type = String, format = Date)]
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<DateTime<Utc>>,
    pub payment_link: Option<String>,
    pub tentativas_envio: i32,
    pub nome_locatario: Option<String>,
    pub placa: Option<String>,
}

/// Estado de expiração calculado sob demanda (nunca persistido): tempo
/// restante até as 23:30 do dia do vencimento.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expiracao {
    pub expirado: bool,
    pub restante_segundos: i64,
    #[schema(example = "02h 05m 09s")]
    pub contagem: String,
}

// Item da listagem já com a contagem regressiva anexada
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CobrancaComExpiracao {
    #[serde(flatten)]
    pub cobranca: CobrancaDetalhe,
    // Presente apenas para pendente/atrasado
    pub expiracao: Option<Expiracao>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DestinoLancamento {
    // Soma o valor na fatura pendente mais antiga do locatário
    SomarFatura,
    // Gera uma cobrança avulsa nova
    Separado,
}

// Lançamento manual: despesa do locador ou receita avulsa/somada
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LancamentoManualPayload {
    pub tipo: TipoCobranca,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "manutencao")]
    pub categoria: String,

    #[schema(example = "50.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-01-08")]
    pub data_vencimento: NaiveDate,

    // Obrigatório quando tipo = receita
    pub id_locatario: Option<Uuid>,

    #[serde(default = "default_destino")]
    pub destino: DestinoLancamento,
}

fn default_destino() -> DestinoLancamento {
    DestinoLancamento::Separado
}
