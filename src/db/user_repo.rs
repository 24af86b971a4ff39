// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::Usuario, configuracao::ConfiguracoesPayload},
};

const COLUNAS: &str = "id, email, senha_hash, nome_completo, whatsapp, role, ativo, \
     access_token_mercado_pago, evolution_url, evolution_instance, evolution_apikey, \
     created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        email: &str,
        senha_hash: &str,
        nome_completo: Option<&str>,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(&format!(
            r#"
            INSERT INTO usuarios (email, senha_hash, nome_completo)
            VALUES ($1, $2, $3)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(email)
        .bind(senha_hash)
        .bind(nome_completo)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn find_by_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUNAS} FROM usuarios WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(usuario)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUNAS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(usuario)
    }

    // =========================================================================
    //  CONFIGURAÇÕES DA CONTA
    // =========================================================================

    pub async fn update_configuracoes<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &ConfiguracoesPayload,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            r#"
            UPDATE usuarios SET
                nome_completo = $2,
                whatsapp = $3,
                access_token_mercado_pago = $4,
                evolution_url = $5,
                evolution_instance = $6,
                evolution_apikey = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        ))
        .bind(id)
        .bind(&payload.nome_completo)
        .bind(&payload.whatsapp)
        .bind(&payload.access_token_mercado_pago)
        .bind(&payload.evolution_url)
        .bind(&payload.evolution_instance)
        .bind(&payload.evolution_apikey)
        .fetch_optional(executor)
        .await?;

        usuario.ok_or(AppError::UsuarioNaoEncontrado)
    }

    // =========================================================================
    //  ADMINISTRAÇÃO
    // =========================================================================

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuarios = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUNAS} FROM usuarios ORDER BY created_at DESC"
        ))
        .fetch_all(executor)
        .await?;

        Ok(usuarios)
    }

    pub async fn set_ativo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        ativo: bool,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            r#"
            UPDATE usuarios SET ativo = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        ))
        .bind(id)
        .bind(ativo)
        .fetch_optional(executor)
        .await?;

        usuario.ok_or(AppError::UsuarioNaoEncontrado)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(AppError::from_constraint)?;

        if result.rows_affected() == 0 {
            return Err(AppError::UsuarioNaoEncontrado);
        }
        Ok(())
    }
}
