// src/services/mensagem_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::mensagem_repo::MensagemRepository,
    models::mensagem::{MensagemTemplate, SalvarTemplatesPayload},
};

// Régua de cobrança padrão: o despachante externo envia a de ordem 1 às
// 20:00 do vencimento e avança uma posição a cada meia hora
const TEMPLATES_PADRAO: [(&str, &str); 7] = [
    (
        "1º Lembrete (20:00)",
        "Olá {nome}! Sua cobrança do aluguel de HOJE foi gerada no valor de {valor}. Pague pelo link: {link}",
    ),
    (
        "2º Lembrete (20:30)",
        "Oi {nome}, ainda não identificamos o seu pagamento de {valor}. O link segue válido: {link}",
    ),
    (
        "3º Lembrete (21:00)",
        "{nome}, lembrando que o pagamento de {valor} vence hoje. Link: {link}",
    ),
    (
        "4º Lembrete (21:30)",
        "Atenção {nome}: faltam 2 horas para o vencimento da sua cobrança de {valor}. Link: {link}",
    ),
    (
        "5º Lembrete (22:00)",
        "{nome}, seu pagamento de {valor} ainda está em aberto. Evite bloqueio: {link}",
    ),
    (
        "6º Lembrete (22:30)",
        "Última hora, {nome}! O link de pagamento de {valor} expira às 23:30: {link}",
    ),
    (
        "7º Lembrete (23:00)",
        "{nome}, esta é a última chamada: o link de {valor} expira em 30 minutos. {link}",
    ),
];

#[derive(Clone)]
pub struct MensagemService {
    mensagem_repo: MensagemRepository,
    pool: PgPool,
}

impl MensagemService {
    pub fn new(mensagem_repo: MensagemRepository, pool: PgPool) -> Self {
        Self { mensagem_repo, pool }
    }

    /// Lista a régua da conta. Conta nova ganha a régua padrão na hora,
    /// persistida, para o dono editar a partir dela.
    pub async fn listar(&self, id_usuario: Uuid) -> Result<Vec<MensagemTemplate>, AppError> {
        let existentes = self.mensagem_repo.get_all(&self.pool, id_usuario).await?;
        if !existentes.is_empty() {
            return Ok(existentes);
        }

        let mut tx = self.pool.begin().await?;
        let mut criados = Vec::with_capacity(TEMPLATES_PADRAO.len());
        for (i, (titulo, conteudo)) in TEMPLATES_PADRAO.iter().enumerate() {
            let template = self
                .mensagem_repo
                .upsert(&mut *tx, id_usuario, (i + 1) as i32, titulo, conteudo)
                .await?;
            criados.push(template);
        }
        tx.commit().await?;

        tracing::info!("📨 Régua padrão criada para a conta {}", id_usuario);
        Ok(criados)
    }

    /// Salva a régua inteira numa transação: upsert por (conta, ordem),
    /// então salvar duas vezes é idempotente.
    pub async fn salvar(
        &self,
        id_usuario: Uuid,
        payload: &SalvarTemplatesPayload,
    ) -> Result<Vec<MensagemTemplate>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut salvos = Vec::with_capacity(payload.templates.len());
        for item in &payload.templates {
            let template = self
                .mensagem_repo
                .upsert(&mut *tx, id_usuario, item.ordem, item.titulo.trim(), &item.conteudo)
                .await?;
            salvos.push(template);
        }
        tx.commit().await?;

        salvos.sort_by_key(|t| t.ordem);
        Ok(salvos)
    }
}
