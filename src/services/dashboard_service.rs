// src/services/dashboard_service.rs
//
// Indicadores do painel, todos derivados na leitura: nada de saldo
// materializado para desviar da verdade das cobranças.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{cobranca_repo::CobrancaRepository, contrato_repo::ContratoRepository},
    models::{
        cobranca::{CobrancaDetalhe, StatusCobranca, TipoCobranca},
        dashboard::{DashboardResumo, ResumoFinanceiro},
    },
    services::cobranca_service,
};

// A fila de cobrança do painel mostra as N receitas em aberto que
// vencem primeiro
const TAMANHO_FILA: usize = 8;

#[derive(Clone)]
pub struct DashboardService {
    cobranca_repo: CobrancaRepository,
    contrato_repo: ContratoRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(
        cobranca_repo: CobrancaRepository,
        contrato_repo: ContratoRepository,
        pool: PgPool,
    ) -> Self {
        Self { cobranca_repo, contrato_repo, pool }
    }

    pub async fn resumo(&self, id_usuario: Uuid) -> Result<DashboardResumo, AppError> {
        let cobrancas = self.cobranca_repo.get_all_detalhado(&self.pool, id_usuario).await?;
        let contratos_ativos = self.contrato_repo.count_ativos(&self.pool, id_usuario).await?;

        let agora = Utc::now();
        Ok(DashboardResumo {
            resumo: resumo_financeiro(&cobrancas, contratos_ativos),
            proximas_cobrancas: fila_de_cobranca(cobrancas, agora),
        })
    }
}

// Saldo líquido = receitas pagas - despesas; receita pendente = receitas
// em aberto (pendente ou atrasada)
fn resumo_financeiro(cobrancas: &[CobrancaDetalhe], contratos_ativos: i64) -> ResumoFinanceiro {
    let mut saldo_liquido = Decimal::ZERO;
    let mut receita_pendente = Decimal::ZERO;

    for c in cobrancas {
        match (c.tipo, c.status) {
            (TipoCobranca::Receita, StatusCobranca::Pago) => saldo_liquido += c.valor,
            (TipoCobranca::Receita, StatusCobranca::Pendente | StatusCobranca::Atrasado) => {
                receita_pendente += c.valor
            }
            (TipoCobranca::Despesa, _) => saldo_liquido -= c.valor,
            _ => {}
        }
    }

    ResumoFinanceiro { saldo_liquido, receita_pendente, contratos_ativos }
}

fn fila_de_cobranca(
    cobrancas: Vec<CobrancaDetalhe>,
    agora: DateTime<Utc>,
) -> Vec<crate::models::cobranca::CobrancaComExpiracao> {
    let mut abertas: Vec<CobrancaDetalhe> = cobrancas
        .into_iter()
        .filter(|c| c.tipo == TipoCobranca::Receita)
        .filter(|c| matches!(c.status, StatusCobranca::Pendente | StatusCobranca::Atrasado))
        .collect();

    abertas.sort_by(|a, b| a.data_vencimento.cmp(&b.data_vencimento));

    abertas
        .into_iter()
        .take(TAMANHO_FILA)
        .map(|c| cobranca_service::anexar_expiracao(c, agora))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn cobranca(
        tipo: TipoCobranca,
        status: StatusCobranca,
        valor: Decimal,
        dia: u32,
    ) -> CobrancaDetalhe {
        CobrancaDetalhe {
            id: Uuid::new_v4(),
            id_contrato: None,
            id_locatario: None,
            valor,
            tipo,
            categoria: "aluguel".into(),
            status,
            data_vencimento: NaiveDate::from_ymd_opt(2024, 6, dia).unwrap(),
            data_pagamento: None,
            payment_link: None,
            tentativas_envio: 0,
            nome_locatario: None,
            placa: None,
        }
    }

    #[test]
    fn saldo_liquido_soma_receitas_pagas_e_subtrai_despesas() {
        let cobrancas = vec![
            cobranca(TipoCobranca::Receita, StatusCobranca::Pago, dec!(300.00), 1),
            cobranca(TipoCobranca::Receita, StatusCobranca::Pago, dec!(150.00), 2),
            cobranca(TipoCobranca::Despesa, StatusCobranca::Pago, dec!(80.00), 3),
        ];

        let resumo = resumo_financeiro(&cobrancas, 2);
        assert_eq!(resumo.saldo_liquido, dec!(370.00));
        assert_eq!(resumo.contratos_ativos, 2);
    }

    #[test]
    fn receita_pendente_inclui_atrasadas_e_ignora_pagas() {
        let cobrancas = vec![
            cobranca(TipoCobranca::Receita, StatusCobranca::Pendente, dec!(100.00), 1),
            cobranca(TipoCobranca::Receita, StatusCobranca::Atrasado, dec!(50.00), 2),
            cobranca(TipoCobranca::Receita, StatusCobranca::Pago, dec!(999.00), 3),
        ];

        let resumo = resumo_financeiro(&cobrancas, 0);
        assert_eq!(resumo.receita_pendente, dec!(150.00));
    }

    #[test]
    fn receita_expirada_fica_fora_dos_dois_totais() {
        let cobrancas =
            vec![cobranca(TipoCobranca::Receita, StatusCobranca::Expirado, dec!(100.00), 1)];

        let resumo = resumo_financeiro(&cobrancas, 0);
        assert_eq!(resumo.saldo_liquido, Decimal::ZERO);
        assert_eq!(resumo.receita_pendente, Decimal::ZERO);
    }

    #[test]
    fn fila_ordena_pelo_vencimento_e_corta_em_oito() {
        let mut cobrancas: Vec<CobrancaDetalhe> = (1..=10)
            .map(|dia| cobranca(TipoCobranca::Receita, StatusCobranca::Pendente, dec!(10.00), dia))
            .collect();
        // Despesa e receita paga não entram na fila
        cobrancas.push(cobranca(TipoCobranca::Despesa, StatusCobranca::Pago, dec!(10.00), 1));
        cobrancas.push(cobranca(TipoCobranca::Receita, StatusCobranca::Pago, dec!(10.00), 1));

        let fila = fila_de_cobranca(cobrancas, Utc::now());
        assert_eq!(fila.len(), 8);
        let dias: Vec<u32> = fila
            .iter()
            .map(|c| {
                use chrono::Datelike;
                c.cobranca.data_vencimento.day()
            })
            .collect();
        assert_eq!(dias, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
