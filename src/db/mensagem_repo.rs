// src/db/mensagem_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::mensagem::MensagemTemplate};

#[derive(Clone)]
pub struct MensagemRepository {
    pool: PgPool,
}

impl MensagemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<MensagemTemplate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let templates = sqlx::query_as::<_, MensagemTemplate>(
            "SELECT * FROM mensagens_template WHERE id_usuario = $1 ORDER BY ordem ASC",
        )
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(templates)
    }

    // Idempotente por (id_usuario, ordem): salvar de novo sobrescreve o
    // título e o conteúdo da posição
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        ordem: i32,
        titulo: &str,
        conteudo: &str,
    ) -> Result<MensagemTemplate, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let template = sqlx::query_as::<_, MensagemTemplate>(
            r#"
            INSERT INTO mensagens_template (id_usuario, ordem, titulo, conteudo)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT mensagens_template_ordem_key
            DO UPDATE SET titulo = EXCLUDED.titulo, conteudo = EXCLUDED.conteudo
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(ordem)
        .bind(titulo)
        .bind(conteudo)
        .fetch_one(executor)
        .await?;

        Ok(template)
    }
}
