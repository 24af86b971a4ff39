// src/db/contrato_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contrato::{Contrato, ContratoDetalhe, StatusContrato},
};

#[derive(Clone)]
pub struct ContratoRepository {
    pool: PgPool,
}

impl ContratoRepository {
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
        id_locatario: Uuid,
        id_veiculo: Uuid,
        valor: Decimal,
        recorrencia: &str,
        status: StatusContrato,
        data_inicio: NaiveDate,
        proxima_cobranca: DateTime<Utc>,
    ) -> Result<Contrato, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Contrato>(
            r#"
            INSERT INTO contratos
                (id_usuario, id_locatario, id_veiculo, valor, recorrencia,
                 status, data_inicio, proxima_cobranca)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(id_locatario)
        .bind(id_veiculo)
        .bind(valor)
        .bind(recorrencia)
        .bind(status)
        .bind(data_inicio)
        .bind(proxima_cobranca)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn get_all_detalhado<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<ContratoDetalhe>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contratos = sqlx::query_as::<_, ContratoDetalhe>(
            r#"
            SELECT c.id, c.id_locatario, c.id_veiculo, c.valor, c.recorrencia,
                   c.status, c.data_inicio, c.proxima_cobranca,
                   l.nome_completo AS nome_locatario, v.placa, v.modelo
            FROM contratos c
            JOIN locatarios l ON l.id = c.id_locatario
            JOIN veiculos v ON v.id = c.id_veiculo
            WHERE c.id_usuario = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(contratos)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<Option<Contrato>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contrato = sqlx::query_as::<_, Contrato>(
            "SELECT * FROM contratos WHERE id = $1 AND id_usuario = $2",
        )
        .bind(id)
        .bind(id_usuario)
        .fetch_optional(executor)
        .await?;

        Ok(contrato)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
        id_locatario: Uuid,
        id_veiculo: Uuid,
        valor: Decimal,
        recorrencia: &str,
        status: StatusContrato,
        data_inicio: NaiveDate,
        proxima_cobranca: DateTime<Utc>,
    ) -> Result<Contrato, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contrato = sqlx::query_as::<_, Contrato>(
            r#"
            UPDATE contratos SET
                id_locatario = $3, id_veiculo = $4, valor = $5, recorrencia = $6,
                status = $7, data_inicio = $8, proxima_cobranca = $9
            WHERE id = $1 AND id_usuario = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(id_usuario)
        .bind(id_locatario)
        .bind(id_veiculo)
        .bind(valor)
        .bind(recorrencia)
        .bind(status)
        .bind(data_inicio)
        .bind(proxima_cobranca)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_constraint)?;

        contrato.ok_or(AppError::ContratoNaoEncontrado)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
        status: StatusContrato,
    ) -> Result<Contrato, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contrato = sqlx::query_as::<_, Contrato>(
            r#"
            UPDATE contratos SET status = $3
            WHERE id = $1 AND id_usuario = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(id_usuario)
        .bind(status)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_constraint)?;

        contrato.ok_or(AppError::ContratoNaoEncontrado)
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
        let result = sqlx::query("DELETE FROM contratos WHERE id = $1 AND id_usuario = $2")
            .bind(id)
            .bind(id_usuario)
            .execute(executor)
            .await
            .map_err(AppError::from_constraint)?;

        if result.rows_affected() == 0 {
            return Err(AppError::ContratoNaoEncontrado);
        }
        Ok(())
    }

    // Pares (id_veiculo, id_contrato) dos contratos ativos da conta; o
    // filtro de disponibilidade em si é feito em memória no serviço
    pub async fn veiculos_com_contrato_ativo<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<(Uuid, Uuid)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pares = sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT id_veiculo, id FROM contratos WHERE id_usuario = $1 AND status = 'ativo'",
        )
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(pares)
    }

    pub async fn count_ativos<'e, E>(&self, executor: E, id_usuario: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM contratos WHERE id_usuario = $1 AND status = 'ativo'",
        )
        .bind(id_usuario)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }
}
