// src/services/configuracao_service.rs
//
// Configurações da conta e a verificação de conexão da instância
// Evolution (WhatsApp). A verificação é um poll LIMITADO e disparado
// pelo dono da conta, nunca um timer de fundo.

use std::time::Duration;

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::user_repo::UserRepository,
    models::configuracao::{ConexaoWhatsapp, Configuracoes, ConfiguracoesPayload},
};

const MAX_TENTATIVAS: u32 = 8;
const INTERVALO_ENTRE_TENTATIVAS: Duration = Duration::from_secs(2);

// "open" é o estado conectado na Evolution API
const ESTADO_CONECTADO: &str = "open";

#[derive(Debug, Deserialize)]
struct ConnectionStateResponse {
    instance: InstanceState,
}

#[derive(Debug, Deserialize)]
struct InstanceState {
    state: String,
}

#[derive(Clone)]
pub struct ConfiguracaoService {
    user_repo: UserRepository,
    http: reqwest::Client,
    pool: PgPool,
}

impl ConfiguracaoService {
    pub fn new(user_repo: UserRepository, http: reqwest::Client, pool: PgPool) -> Self {
        Self { user_repo, http, pool }
    }

    pub async fn buscar(&self, id_usuario: Uuid) -> Result<Configuracoes, AppError> {
        let usuario = self
            .user_repo
            .find_by_id(&self.pool, id_usuario)
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)?;

        Ok(Configuracoes::from(usuario))
    }

    pub async fn salvar(
        &self,
        id_usuario: Uuid,
        payload: &ConfiguracoesPayload,
    ) -> Result<Configuracoes, AppError> {
        let usuario = self.user_repo.update_configuracoes(&self.pool, id_usuario, payload).await?;
        Ok(Configuracoes::from(usuario))
    }

    /// Consulta o estado da instância na Evolution API até MAX_TENTATIVAS
    /// vezes, parando na primeira resposta "open". Falha de rede numa
    /// tentativa não aborta o poll; credenciais ausentes abortam antes
    /// da primeira.
    pub async fn verificar_conexao_whatsapp(
        &self,
        id_usuario: Uuid,
    ) -> Result<ConexaoWhatsapp, AppError> {
        let usuario = self
            .user_repo
            .find_by_id(&self.pool, id_usuario)
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)?;

        let (url, instance, apikey) = match (
            usuario.evolution_url.as_deref(),
            usuario.evolution_instance.as_deref(),
            usuario.evolution_apikey.as_deref(),
        ) {
            (Some(url), Some(instance), Some(apikey)) => (url, instance, apikey),
            _ => {
                return Err(AppError::RequisicaoInvalida(
                    "Configure a URL, a instância e a API key da Evolution antes de verificar".into(),
                ))
            }
        };

        let endpoint = format!(
            "{}/instance/connectionState/{}",
            url.trim_end_matches('/'),
            instance
        );

        let mut ultimo_estado = String::from("desconhecido");
        for tentativa in 1..=MAX_TENTATIVAS {
            match self.consultar_estado(&endpoint, apikey).await {
                Ok(estado) => {
                    ultimo_estado = estado;
                    if ultimo_estado == ESTADO_CONECTADO {
                        tracing::info!("📱 WhatsApp conectado na tentativa {}", tentativa);
                        return Ok(ConexaoWhatsapp {
                            estado: ultimo_estado,
                            tentativas: tentativa,
                            conectado: true,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!("Tentativa {} de verificação falhou: {}", tentativa, e);
                }
            }

            if tentativa < MAX_TENTATIVAS {
                tokio::time::sleep(INTERVALO_ENTRE_TENTATIVAS).await;
            }
        }

        Ok(ConexaoWhatsapp {
            estado: ultimo_estado,
            tentativas: MAX_TENTATIVAS,
            conectado: false,
        })
    }

    async fn consultar_estado(&self, endpoint: &str, apikey: &str) -> Result<String, reqwest::Error> {
        let resposta = self
            .http
            .get(endpoint)
            .header("apikey", apikey)
            .send()
            .await?
            .error_for_status()?
            .json::<ConnectionStateResponse>()
            .await?;

        Ok(resposta.instance.state)
    }
}
