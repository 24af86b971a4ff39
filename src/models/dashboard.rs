// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::cobranca::CobrancaComExpiracao;

// Indicadores do painel. Derivados por dobras puras sobre a coleção de
// cobranças da conta; nada aqui é persistido.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoFinanceiro {
    // Receitas pagas - Despesas
    #[schema(example = "120.00")]
    pub saldo_liquido: Decimal,

    // Total de receitas pendentes/atrasadas
    #[schema(example = "200.00")]
    pub receita_pendente: Decimal,

    pub contratos_ativos: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResumo {
    #[serde(flatten)]
    pub resumo: ResumoFinanceiro,

    // Fila de cobrança prioritária: as 8 receitas pendentes/atrasadas
    // que vencem primeiro, com contagem regressiva
    pub proximas_cobrancas: Vec<CobrancaComExpiracao>,
}
