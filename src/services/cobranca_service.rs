// src/services/cobranca_service.rs
//
// Ciclo de vida da cobrança: emissão avulsa (despesa ou receita), soma
// em fatura pendente, baixa manual e a contagem regressiva até o corte
// das 23:30. O job externo de faturamento é quem emite as recorrentes e
// grava `expirado`; aqui a expiração é sempre recalculada ao vivo.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{cobranca_repo::CobrancaRepository, locatario_repo::LocatarioRepository},
    models::cobranca::{
        Cobranca, CobrancaComExpiracao, CobrancaDetalhe, DestinoLancamento, Expiracao,
        LancamentoManualPayload, StatusCobranca, TipoCobranca,
    },
};

// Depois das 23:30 locais do dia do vencimento o link de pagamento
// não vale mais e o locatário precisa pedir outro
const HORA_CORTE: u32 = 23;
const MINUTO_CORTE: u32 = 30;

#[derive(Clone)]
pub struct CobrancaService {
    cobranca_repo: CobrancaRepository,
    locatario_repo: LocatarioRepository,
    pool: PgPool,
}

impl CobrancaService {
    pub fn new(
        cobranca_repo: CobrancaRepository,
        locatario_repo: LocatarioRepository,
        pool: PgPool,
    ) -> Self {
        Self { cobranca_repo, locatario_repo, pool }
    }

    pub async fn listar(&self, id_usuario: Uuid) -> Result<Vec<CobrancaComExpiracao>, AppError> {
        let cobrancas = self.cobranca_repo.get_all_detalhado(&self.pool, id_usuario).await?;
        let agora = Utc::now();
        Ok(cobrancas.into_iter().map(|c| anexar_expiracao(c, agora)).collect())
    }

    /// Lançamento manual, três caminhos:
    /// - despesa: nasce PAGA, é registro de um gasto e não um recebível;
    /// - receita separada: nasce pendente, avulsa, sem contrato;
    /// - receita somada: incrementa a fatura pendente mais antiga do
    ///   locatário em vez de criar outra, invalidando o link de
    ///   pagamento antigo.
    pub async fn lancamento_manual(
        &self,
        id_usuario: Uuid,
        payload: &LancamentoManualPayload,
    ) -> Result<Cobranca, AppError> {
        if payload.valor <= Decimal::ZERO {
            return Err(AppError::RequisicaoInvalida("O valor deve ser maior que zero".into()));
        }

        match payload.tipo {
            TipoCobranca::Despesa => {
                self.cobranca_repo
                    .create(
                        &self.pool,
                        id_usuario,
                        None,
                        None,
                        payload.valor,
                        TipoCobranca::Despesa,
                        &payload.categoria,
                        StatusCobranca::Pago,
                        payload.data_vencimento,
                        true,
                    )
                    .await
            }
            TipoCobranca::Receita => {
                let id_locatario = payload.id_locatario.ok_or_else(|| {
                    AppError::RequisicaoInvalida("Receita exige um locatário".into())
                })?;

                self.locatario_repo
                    .find_by_id(&self.pool, id_usuario, id_locatario)
                    .await?
                    .ok_or(AppError::LocatarioNaoEncontrado)?;

                match payload.destino {
                    DestinoLancamento::Separado => {
                        self.cobranca_repo
                            .create(
                                &self.pool,
                                id_usuario,
                                None,
                                Some(id_locatario),
                                payload.valor,
                                TipoCobranca::Receita,
                                &payload.categoria,
                                StatusCobranca::Pendente,
                                payload.data_vencimento,
                                false,
                            )
                            .await
                    }
                    DestinoLancamento::SomarFatura => {
                        self.somar_na_fatura(id_usuario, id_locatario, payload.valor).await
                    }
                }
            }
        }
    }

    // Localiza-e-soma em dois passos: a busca escolhe o alvo, o update
    // condicional só aplica se o alvo AINDA estiver pendente. Se um
    // pagamento entrar no meio, ninguém soma em fatura paga.
    async fn somar_na_fatura(
        &self,
        id_usuario: Uuid,
        id_locatario: Uuid,
        valor: Decimal,
    ) -> Result<Cobranca, AppError> {
        let alvo = self
            .cobranca_repo
            .fatura_pendente_mais_antiga(&self.pool, id_usuario, id_locatario)
            .await?
            .ok_or(AppError::FaturaPendenteNaoEncontrada)?;

        let somada = self
            .cobranca_repo
            .somar_em_fatura_pendente(&self.pool, id_usuario, alvo.id, valor)
            .await?
            .ok_or(AppError::ConflitoDeConcorrencia)?;

        tracing::info!(
            "➕ Valor {} somado na fatura {} (novo total {})",
            valor,
            somada.id,
            somada.valor
        );
        Ok(somada)
    }

    /// Baixa manual: pendente/atrasada/expirada vira paga, com
    /// `data_pagamento` de agora. Paga de novo é conflito, não no-op.
    pub async fn dar_baixa(&self, id_usuario: Uuid, id: Uuid) -> Result<Cobranca, AppError> {
        match self.cobranca_repo.dar_baixa(&self.pool, id_usuario, id).await? {
            Some(cobranca) => {
                tracing::info!("💰 Baixa registrada na cobrança {}", cobranca.id);
                Ok(cobranca)
            }
            None => {
                // 0 linhas: ou não existe, ou já estava paga
                match self.cobranca_repo.find_by_id(&self.pool, id_usuario, id).await? {
                    Some(_) => Err(AppError::CobrancaJaPaga),
                    None => Err(AppError::CobrancaNaoEncontrada),
                }
            }
        }
    }

    pub async fn registrar_envio(&self, id_usuario: Uuid, id: Uuid) -> Result<Cobranca, AppError> {
        self.cobranca_repo.registrar_envio(&self.pool, id_usuario, id).await
    }

    pub async fn excluir(&self, id_usuario: Uuid, id: Uuid) -> Result<(), AppError> {
        self.cobranca_repo.delete(&self.pool, id_usuario, id).await
    }
}

// =============================================================================
//  EXPIRAÇÃO (derivada, nunca persistida por este serviço)
// =============================================================================

/// Contagem regressiva até as 23:30 locais do dia do vencimento. Só faz
/// sentido para cobrança em aberto; paga não expira.
pub fn calcular_expiracao(cobranca: &CobrancaDetalhe, agora: DateTime<Utc>) -> Option<Expiracao> {
    if !matches!(cobranca.status, StatusCobranca::Pendente | StatusCobranca::Atrasado) {
        return None;
    }

    let corte_local = cobranca
        .data_vencimento
        .and_time(NaiveTime::from_hms_opt(HORA_CORTE, MINUTO_CORTE, 0)?);
    let corte = crate::services::recorrencia::resolver_local_adiante(corte_local);

    let restante = corte.signed_duration_since(agora);
    let restante_segundos = restante.num_seconds();

    Some(Expiracao {
        expirado: restante_segundos <= 0,
        restante_segundos: restante_segundos.max(0),
        contagem: formatar_contagem(restante),
    })
}

pub fn anexar_expiracao(cobranca: CobrancaDetalhe, agora: DateTime<Utc>) -> CobrancaComExpiracao {
    let expiracao = calcular_expiracao(&cobranca, agora);
    CobrancaComExpiracao { cobranca, expiracao }
}

// "02h 05m 09s"; zerada quando já passou do corte
fn formatar_contagem(restante: Duration) -> String {
    let total = restante.num_seconds().max(0);
    let horas = total / 3600;
    let minutos = (total % 3600) / 60;
    let segundos = total % 60;
    format!("{horas:02}h {minutos:02}m {segundos:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::recorrencia::FUSO_LOCAL;
    use chrono::{NaiveDate, TimeZone};

    fn detalhe(status: StatusCobranca, data_vencimento: NaiveDate) -> CobrancaDetalhe {
        CobrancaDetalhe {
            id: Uuid::new_v4(),
            id_contrato: None,
            id_locatario: None,
            valor: Decimal::new(30000, 2),
            tipo: TipoCobranca::Receita,
            categoria: "aluguel".into(),
            status,
            data_vencimento,
            data_pagamento: None,
            payment_link: None,
            tentativas_envio: 0,
            nome_locatario: None,
            placa: None,
        }
    }

    fn instante_local(ano: i32, mes: u32, dia: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        FUSO_LOCAL
            .with_ymd_and_hms(ano, mes, dia, h, m, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn pendente_antes_do_corte_tem_contagem_positiva() {
        let venc = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let agora = instante_local(2024, 6, 10, 21, 0, 0);

        let exp = calcular_expiracao(&detalhe(StatusCobranca::Pendente, venc), agora).unwrap();
        assert!(!exp.expirado);
        // faltam exatamente 2h30 para as 23:30
        assert_eq!(exp.restante_segundos, 2 * 3600 + 30 * 60);
    }

    #[test]
    fn contagem_formatada_com_horas_minutos_segundos() {
        let venc = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let corte = instante_local(2024, 6, 10, 23, 30, 0);
        let agora = corte - Duration::seconds(2 * 3600 + 5 * 60 + 9);

        let exp = calcular_expiracao(&detalhe(StatusCobranca::Pendente, venc), agora).unwrap();
        assert_eq!(exp.contagem, "02h 05m 09s");
    }

    #[test]
    fn depois_do_corte_expira_e_zera_a_contagem() {
        let venc = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let agora = instante_local(2024, 6, 11, 0, 10, 0);

        let exp = calcular_expiracao(&detalhe(StatusCobranca::Atrasado, venc), agora).unwrap();
        assert!(exp.expirado);
        assert_eq!(exp.restante_segundos, 0);
        assert_eq!(exp.contagem, "00h 00m 00s");
    }

    #[test]
    fn exatamente_no_corte_conta_como_expirada() {
        let venc = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let agora = instante_local(2024, 6, 10, 23, 30, 0);

        let exp = calcular_expiracao(&detalhe(StatusCobranca::Pendente, venc), agora).unwrap();
        assert!(exp.expirado);
    }

    #[test]
    fn cobranca_paga_nao_tem_expiracao() {
        let venc = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let agora = instante_local(2024, 6, 10, 12, 0, 0);

        assert!(calcular_expiracao(&detalhe(StatusCobranca::Pago, venc), agora).is_none());
    }

    #[test]
    fn vencimento_futuro_soma_os_dias_na_contagem() {
        let venc = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let agora = instante_local(2024, 6, 10, 23, 30, 0);

        let exp = calcular_expiracao(&detalhe(StatusCobranca::Pendente, venc), agora).unwrap();
        // 48h inteiras até o corte de 12/06
        assert_eq!(exp.restante_segundos, 48 * 3600);
        assert_eq!(exp.contagem, "48h 00m 00s");
    }
}
