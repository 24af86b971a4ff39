// src/db/cobranca_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cobranca::{Cobranca, CobrancaDetalhe, StatusCobranca, TipoCobranca},
};

// A listagem resolve locatário e placa por LEFT JOIN: despesas não têm
// locatário e lançamentos avulsos não têm contrato/veículo
const SELECT_DETALHADO: &str = r#"
    SELECT cb.id, cb.id_contrato, cb.id_locatario, cb.valor, cb.tipo,
           cb.categoria, cb.status, cb.data_vencimento, cb.data_pagamento,
           cb.payment_link, cb.tentativas_envio,
           l.nome_completo AS nome_locatario, v.placa
    FROM cobrancas cb
    LEFT JOIN locatarios l ON l.id = cb.id_locatario
    LEFT JOIN contratos c ON c.id = cb.id_contrato
    LEFT JOIN veiculos v ON v.id = c.id_veiculo
"#;

#[derive(Clone)]
pub struct CobrancaRepository {
    pool: PgPool,
}

impl CobrancaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id_contrato: Option<Uuid>,
        id_locatario: Option<Uuid>,
        valor: Decimal,
        tipo: TipoCobranca,
        categoria: &str,
        status: StatusCobranca,
        data_vencimento: NaiveDate,
        paga_agora: bool,
    ) -> Result<Cobranca, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Cobranca>(
            r#"
            INSERT INTO cobrancas
                (id_usuario, id_contrato, id_locatario, valor, tipo, categoria,
                 status, data_vencimento, data_pagamento)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    CASE WHEN $9 THEN NOW() ELSE NULL END)
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(id_contrato)
        .bind(id_locatario)
        .bind(valor)
        .bind(tipo)
        .bind(categoria)
        .bind(status)
        .bind(data_vencimento)
        .bind(paga_agora)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn get_all_detalhado<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<CobrancaDetalhe>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobrancas = sqlx::query_as::<_, CobrancaDetalhe>(&format!(
            "{SELECT_DETALHADO} WHERE cb.id_usuario = $1 ORDER BY cb.data_vencimento DESC, cb.created_at DESC"
        ))
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(cobrancas)
    }

    // Visão do Portal do Locatário: só as receitas do próprio locatário,
    // com recorte opcional de período
    pub async fn get_by_locatario<'e, E>(
        &self,
        executor: E,
        id_locatario: Uuid,
        de: Option<NaiveDate>,
        ate: Option<NaiveDate>,
    ) -> Result<Vec<CobrancaDetalhe>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobrancas = sqlx::query_as::<_, CobrancaDetalhe>(&format!(
            "{SELECT_DETALHADO} \
             WHERE cb.id_locatario = $1 AND cb.tipo = 'receita' \
               AND ($2::date IS NULL OR cb.data_vencimento >= $2) \
               AND ($3::date IS NULL OR cb.data_vencimento <= $3) \
             ORDER BY cb.data_vencimento DESC"
        ))
        .bind(id_locatario)
        .bind(de)
        .bind(ate)
        .fetch_all(executor)
        .await?;

        Ok(cobrancas)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<Option<Cobranca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobranca = sqlx::query_as::<_, Cobranca>(
            "SELECT * FROM cobrancas WHERE id = $1 AND id_usuario = $2",
        )
        .bind(id)
        .bind(id_usuario)
        .fetch_optional(executor)
        .await?;

        Ok(cobranca)
    }

    /// Alvo da soma: a fatura PENDENTE mais antiga do locatário.
    /// Desempate determinístico por (data_vencimento, created_at).
    pub async fn fatura_pendente_mais_antiga<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id_locatario: Uuid,
    ) -> Result<Option<Cobranca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobranca = sqlx::query_as::<_, Cobranca>(
            r#"
            SELECT * FROM cobrancas
            WHERE id_usuario = $1 AND id_locatario = $2
              AND tipo = 'receita' AND status = 'pendente'
            ORDER BY data_vencimento ASC, created_at ASC
            LIMIT 1
            "#,
        )
        .bind(id_usuario)
        .bind(id_locatario)
        .fetch_optional(executor)
        .await?;

        Ok(cobranca)
    }

    /// Incremento condicional: só soma se a fatura AINDA estiver
    /// pendente. Zero linhas afetadas = a fatura mudou de estado entre a
    /// busca e o update (pagamento concorrente), e o chamador decide.
    /// A soma invalida os artefatos de pagamento para o serviço externo
    /// regenerar com o valor novo.
    pub async fn somar_em_fatura_pendente<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id_cobranca: Uuid,
        valor: Decimal,
    ) -> Result<Option<Cobranca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobranca = sqlx::query_as::<_, Cobranca>(
            r#"
            UPDATE cobrancas SET
                valor = valor + $3,
                payment_link = NULL,
                mercado_pago_id = NULL
            WHERE id = $2 AND id_usuario = $1 AND status = 'pendente'
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(id_cobranca)
        .bind(valor)
        .fetch_optional(executor)
        .await?;

        Ok(cobranca)
    }

    /// Baixa manual: marca como paga apenas se ainda não estiver. Zero
    /// linhas = já estava paga (ou sumiu), o serviço distingue.
    pub async fn dar_baixa<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<Option<Cobranca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobranca = sqlx::query_as::<_, Cobranca>(
            r#"
            UPDATE cobrancas SET status = 'pago', data_pagamento = NOW()
            WHERE id = $2 AND id_usuario = $1 AND status <> 'pago'
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(cobranca)
    }

    // Contador consumido pelo despachante de lembretes
    pub async fn registrar_envio<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<Cobranca, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cobranca = sqlx::query_as::<_, Cobranca>(
            r#"
            UPDATE cobrancas SET tentativas_envio = tentativas_envio + 1
            WHERE id = $2 AND id_usuario = $1
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        cobranca.ok_or(AppError::CobrancaNaoEncontrada)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cobrancas WHERE id = $1 AND id_usuario = $2")
            .bind(id)
            .bind(id_usuario)
            .execute(executor)
            .await
            .map_err(AppError::from_constraint)?;

        if result.rows_affected() == 0 {
            return Err(AppError::CobrancaNaoEncontrada);
        }
        Ok(())
    }
}

// Testes de integração contra um Postgres real (DATABASE_URL). Rodar
// com `cargo test -- --ignored` depois de subir o banco.
#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sqlx::PgPool;

    async fn pool_de_teste() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL para os testes");
        PgPool::connect(&url).await.expect("conexão com o Postgres de teste")
    }

    // Conta + locatário descartáveis para cada teste
    async fn seed(pool: &PgPool) -> (Uuid, Uuid) {
        let id_usuario: Uuid = sqlx::query_scalar(
            "INSERT INTO usuarios (email, senha_hash) VALUES ($1, 'x') RETURNING id",
        )
        .bind(format!("{}@teste.local", Uuid::new_v4().simple()))
        .fetch_one(pool)
        .await
        .unwrap();

        let id_locatario: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO locatarios (id_usuario, nome_completo, whatsapp, cpf, portal_token)
            VALUES ($1, 'Locatário de Teste', $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(id_usuario)
        .bind(format!("55{}", &Uuid::new_v4().simple().to_string()[..11]))
        .bind(Uuid::new_v4().simple().to_string())
        .bind(Uuid::new_v4().simple().to_string())
        .fetch_one(pool)
        .await
        .unwrap();

        (id_usuario, id_locatario)
    }

    #[tokio::test]
    #[ignore = "precisa de um Postgres com as migrações aplicadas"]
    async fn somar_incrementa_a_fatura_e_invalida_o_link() {
        let pool = pool_de_teste().await;
        let repo = CobrancaRepository::new(pool.clone());
        let (id_usuario, id_locatario) = seed(&pool).await;

        let fatura = repo
            .create(
                &pool,
                id_usuario,
                None,
                Some(id_locatario),
                dec!(100.00),
                TipoCobranca::Receita,
                "aluguel",
                StatusCobranca::Pendente,
                chrono::Utc::now().date_naive(),
                false,
            )
            .await
            .unwrap();

        sqlx::query("UPDATE cobrancas SET payment_link = 'http://pix', mercado_pago_id = 'mp-1' WHERE id = $1")
            .bind(fatura.id)
            .execute(&pool)
            .await
            .unwrap();

        let depois_10 = repo
            .somar_em_fatura_pendente(&pool, id_usuario, fatura.id, dec!(10.00))
            .await
            .unwrap()
            .unwrap();
        let depois_15 = repo
            .somar_em_fatura_pendente(&pool, id_usuario, fatura.id, dec!(15.00))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(depois_10.valor, dec!(110.00));
        assert_eq!(depois_15.valor, dec!(125.00));
        assert!(depois_15.payment_link.is_none());
        assert!(depois_15.mercado_pago_id.is_none());
    }

    #[tokio::test]
    #[ignore = "precisa de um Postgres com as migrações aplicadas"]
    async fn somar_depois_da_baixa_nao_afeta_nenhuma_linha() {
        let pool = pool_de_teste().await;
        let repo = CobrancaRepository::new(pool.clone());
        let (id_usuario, id_locatario) = seed(&pool).await;

        let fatura = repo
            .create(
                &pool,
                id_usuario,
                None,
                Some(id_locatario),
                dec!(100.00),
                TipoCobranca::Receita,
                "aluguel",
                StatusCobranca::Pendente,
                chrono::Utc::now().date_naive(),
                false,
            )
            .await
            .unwrap();

        // Pagamento entra entre a escolha do alvo e a soma
        let paga = repo.dar_baixa(&pool, id_usuario, fatura.id).await.unwrap();
        assert!(paga.is_some());

        let somada = repo
            .somar_em_fatura_pendente(&pool, id_usuario, fatura.id, dec!(10.00))
            .await
            .unwrap();
        assert!(somada.is_none());

        // E o valor da fatura paga continua intacto
        let recarregada = repo.find_by_id(&pool, id_usuario, fatura.id).await.unwrap().unwrap();
        assert_eq!(recarregada.valor, dec!(100.00));
        assert_eq!(recarregada.status, StatusCobranca::Pago);
    }

    #[tokio::test]
    #[ignore = "precisa de um Postgres com as migrações aplicadas"]
    async fn alvo_da_soma_e_a_pendente_mais_antiga() {
        let pool = pool_de_teste().await;
        let repo = CobrancaRepository::new(pool.clone());
        let (id_usuario, id_locatario) = seed(&pool).await;

        let hoje = chrono::Utc::now().date_naive();
        let antiga = repo
            .create(&pool, id_usuario, None, Some(id_locatario), dec!(50.00),
                TipoCobranca::Receita, "aluguel", StatusCobranca::Pendente,
                hoje - chrono::Duration::days(7), false)
            .await
            .unwrap();
        let _recente = repo
            .create(&pool, id_usuario, None, Some(id_locatario), dec!(60.00),
                TipoCobranca::Receita, "aluguel", StatusCobranca::Pendente, hoje, false)
            .await
            .unwrap();

        let alvo = repo
            .fatura_pendente_mais_antiga(&pool, id_usuario, id_locatario)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alvo.id, antiga.id);
    }
}
