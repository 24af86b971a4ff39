// src/db/locatario_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::locatario::{Locatario, TipoDocumento},
};

#[derive(Clone)]
pub struct LocatarioRepository {
    pool: PgPool,
}

impl LocatarioRepository {
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
        nome_completo: &str,
        whatsapp: &str,
        email: Option<&str>,
        documento: TipoDocumento,
        cpf: &str,
        endereco: EnderecoParams<'_>,
        ativo: bool,
        portal_token: &str,
    ) -> Result<Locatario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Locatario>(
            r#"
            INSERT INTO locatarios
                (id_usuario, nome_completo, whatsapp, email, documento, cpf,
                 cep, rua, numero, bairro, cidade, estado, ativo, portal_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(nome_completo)
        .bind(whatsapp)
        .bind(email)
        .bind(documento)
        .bind(cpf)
        .bind(endereco.cep)
        .bind(endereco.rua)
        .bind(endereco.numero)
        .bind(endereco.bairro)
        .bind(endereco.cidade)
        .bind(endereco.estado)
        .bind(ativo)
        .bind(portal_token)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_constraint)
    }

    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<Locatario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locatarios = sqlx::query_as::<_, Locatario>(
            "SELECT * FROM locatarios WHERE id_usuario = $1 ORDER BY nome_completo ASC",
        )
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(locatarios)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
    ) -> Result<Option<Locatario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locatario = sqlx::query_as::<_, Locatario>(
            "SELECT * FROM locatarios WHERE id = $1 AND id_usuario = $2",
        )
        .bind(id)
        .bind(id_usuario)
        .fetch_optional(executor)
        .await?;

        Ok(locatario)
    }

    // O portal é público: a busca é pelo token, sem escopo de conta
    pub async fn find_by_portal_token<'e, E>(
        &self,
        executor: E,
        portal_token: &str,
    ) -> Result<Option<Locatario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locatario = sqlx::query_as::<_, Locatario>(
            "SELECT * FROM locatarios WHERE portal_token = $1 AND ativo = TRUE",
        )
        .bind(portal_token)
        .fetch_optional(executor)
        .await?;

        Ok(locatario)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
        nome_completo: &str,
        whatsapp: &str,
        email: Option<&str>,
        documento: TipoDocumento,
        cpf: &str,
        endereco: EnderecoParams<'_>,
        ativo: bool,
    ) -> Result<Locatario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locatario = sqlx::query_as::<_, Locatario>(
            r#"
            UPDATE locatarios SET
                nome_completo = $3, whatsapp = $4, email = $5, documento = $6,
                cpf = $7, cep = $8, rua = $9, numero = $10, bairro = $11,
                cidade = $12, estado = $13, ativo = $14
            WHERE id = $1 AND id_usuario = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(id_usuario)
        .bind(nome_completo)
        .bind(whatsapp)
        .bind(email)
        .bind(documento)
        .bind(cpf)
        .bind(endereco.cep)
        .bind(endereco.rua)
        .bind(endereco.numero)
        .bind(endereco.bairro)
        .bind(endereco.cidade)
        .bind(endereco.estado)
        .bind(ativo)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from_constraint)?;

        locatario.ok_or(AppError::LocatarioNaoEncontrado)
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
        let result = sqlx::query("DELETE FROM locatarios WHERE id = $1 AND id_usuario = $2")
            .bind(id)
            .bind(id_usuario)
            .execute(executor)
            .await
            .map_err(AppError::from_constraint)?;

        if result.rows_affected() == 0 {
            return Err(AppError::LocatarioNaoEncontrado);
        }
        Ok(())
    }
}

// Os campos de endereço viajam juntos para não explodir a assinatura
#[derive(Debug, Clone, Copy, Default)]
pub struct EnderecoParams<'a> {
    pub cep: Option<&'a str>,
    pub rua: Option<&'a str>,
    pub numero: Option<&'a str>,
    pub bairro: Option<&'a str>,
    pub cidade: Option<&'a str>,
    pub estado: Option<&'a str>,
}
