// src/db/veiculo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::veiculo::Veiculo};

#[derive(Clone)]
pub struct VeiculoRepository {
    pool: PgPool,
}

impl VeiculoRepository {
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
        placa: &str,
        modelo: &str,
        marca: Option<&str>,
        cor: Option<&str>,
        ano: Option<i32>,
        ativo: bool,
    ) -> Result<Veiculo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Veiculo>(
            r#"
            INSERT INTO veiculos (id_usuario, placa, modelo, marca, cor, ano, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(placa)
        .bind(modelo)
        .bind(marca)
        .bind(cor)
        .bind(ano)
        .bind(ativo)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<Veiculo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let veiculos = sqlx::query_as::<_, Veiculo>(
            "SELECT * FROM veiculos WHERE id_usuario = $1 ORDER BY placa ASC",
        )
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(veiculos)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<Option<Veiculo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            "SELECT * FROM veiculos WHERE id = $1 AND id_usuario = $2",
        )
        .bind(id)
        .bind(id_usuario)
        .fetch_optional(executor)
        .await?;

        Ok(veiculo)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
        placa: &str,
        modelo: &str,
        marca: Option<&str>,
        cor: Option<&str>,
        ano: Option<i32>,
        ativo: bool,
    ) -> Result<Veiculo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            UPDATE veiculos SET
                placa = $3, modelo = $4, marca = $5, cor = $6, ano = $7, ativo = $8
            WHERE id = $1 AND id_usuario = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(id_usuario)
        .bind(placa)
        .bind(modelo)
        .bind(marca)
        .bind(cor)
        .bind(ano)
        .bind(ativo)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_constraint)?;

        veiculo.ok_or(AppError::VeiculoNaoEncontrado)
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
        let result = sqlx::query("DELETE FROM veiculos WHERE id = $1 AND id_usuario = $2")
            .bind(id)
            .bind(id_usuario)
            .execute(executor)
            .await
            .map_err(AppError::from_constraint)?;

        if result.rows_affected() == 0 {
            return Err(AppError::VeiculoNaoEncontrado);
        }
        Ok(())
    }
}
