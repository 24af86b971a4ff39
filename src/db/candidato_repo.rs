// src/db/candidato_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::candidato::Candidato};

#[derive(Clone)]
pub struct CandidatoRepository {
    pool: PgPool,
}

impl CandidatoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        nome: &str,
        telefone: Option<&str>,
        cpf: Option<&str>,
        score_formulario: i32,
    ) -> Result<Candidato, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let candidato = sqlx::query_as::<_, Candidato>(
            r#"
            INSERT INTO candidatos (id_usuario, nome, telefone, cpf, score_formulario)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id_usuario)
        .bind(nome)
        .bind(telefone)
        .bind(cpf)
        .bind(score_formulario)
        .fetch_one(executor)
        .await?;

        Ok(candidato)
    }

    // Fila de triagem: melhor score primeiro, empate pelo mais antigo
    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
    ) -> Result<Vec<Candidato>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let candidatos = sqlx::query_as::<_, Candidato>(
            r#"
            SELECT * FROM candidatos WHERE id_usuario = $1
            ORDER BY score_formulario DESC, created_at ASC
            "#,
        )
        .bind(id_usuario)
        .fetch_all(executor)
        .await?;

        Ok(candidatos)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id_usuario: Uuid,
        id: Uuid,
        status: &str,
        confirma_reserva: bool,
    ) -> Result<Candidato, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O carimbo só existe enquanto o candidato está com a reserva
        // confirmada; qualquer outro status o limpa
        let candidato = sqlx::query_as::<_, Candidato>(
            r#"
            UPDATE candidatos SET
                status = $3,
                reserva_confirmada_em = CASE WHEN $4 THEN NOW() ELSE NULL END
            WHERE id = $1 AND id_usuario = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(id_usuario)
        .bind(status)
        .bind(confirma_reserva)
        .fetch_optional(executor)
        .await?;

        candidato.ok_or(AppError::CandidatoNaoEncontrado)
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
        let result = sqlx::query("DELETE FROM candidatos WHERE id = $1 AND id_usuario = $2")
            .bind(id)
            .bind(id_usuario)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CandidatoNaoEncontrado);
        }
        Ok(())
    }
}

// Testes de integração contra um Postgres real (DATABASE_URL). Rodar
// com `cargo test -- --ignored` depois de subir o banco.
#[cfg(test)]
mod tests {
    use super::*;

    async fn pool_de_teste() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL para os testes");
        PgPool::connect(&url).await.expect("conexão com o Postgres de teste")
    }

    async fn seed_usuario(pool: &PgPool) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO usuarios (email, senha_hash) VALUES ($1, 'x') RETURNING id",
        )
        .bind(format!("{}@teste.local", Uuid::new_v4().simple()))
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    #[ignore = "precisa de um Postgres com as migrações aplicadas"]
    async fn sair_da_reserva_confirmada_limpa_o_carimbo() {
        let pool = pool_de_teste().await;
        let repo = CandidatoRepository::new(pool.clone());
        let id_usuario = seed_usuario(&pool).await;

        let candidato = repo
            .create(&pool, id_usuario, "Candidato de Teste", None, None, 80)
            .await
            .unwrap();
        assert!(candidato.reserva_confirmada_em.is_none());

        let confirmado = repo
            .update_status(&pool, id_usuario, candidato.id, "Reserva Confirmada", true)
            .await
            .unwrap();
        assert!(confirmado.reserva_confirmada_em.is_some());

        // Voltar atrás na triagem desfaz a confirmação
        let reaberto = repo
            .update_status(&pool, id_usuario, candidato.id, "Aguardando Reserva", false)
            .await
            .unwrap();
        assert_eq!(reaberto.status, "Aguardando Reserva");
        assert!(reaberto.reserva_confirmada_em.is_none());
    }
}
