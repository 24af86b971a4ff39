// src/services/locatario_service.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        formatters::{apenas_digitos, normalizar_whatsapp},
    },
    db::{
        cobranca_repo::CobrancaRepository,
        locatario_repo::{EnderecoParams, LocatarioRepository},
    },
    models::{
        cobranca::CobrancaComExpiracao,
        locatario::{Locatario, LocatarioPayload},
    },
    services::cobranca_service,
};

// Resposta do Portal do Locatário: os dados do próprio locatário e as
// suas faturas, com contagem regressiva
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalView {
    pub locatario: Locatario,
    pub cobrancas: Vec<CobrancaComExpiracao>,
}

#[derive(Clone)]
pub struct LocatarioService {
    locatario_repo: LocatarioRepository,
    cobranca_repo: CobrancaRepository,
}

impl LocatarioService {
    pub fn new(locatario_repo: LocatarioRepository, cobranca_repo: CobrancaRepository) -> Self {
        Self { locatario_repo, cobranca_repo }
    }

    pub async fn criar(
        &self,
        id_usuario: Uuid,
        payload: &LocatarioPayload,
    ) -> Result<Locatario, AppError> {
        // Documento, CEP e WhatsApp persistem normalizados (só dígitos,
        // DDI 55 no WhatsApp)
        let cpf = apenas_digitos(&payload.cpf);
        let whatsapp = normalizar_whatsapp(&payload.whatsapp);
        let cep = payload.cep.as_deref().map(apenas_digitos);

        // Token opaco do portal, gerado uma vez e nunca rotacionado aqui
        let portal_token = Uuid::new_v4().simple().to_string();

        self.locatario_repo
            .create(
                self.locatario_repo.pool(),
                id_usuario,
                payload.nome_completo.trim(),
                &whatsapp,
                payload.email.as_deref(),
                payload.documento,
                &cpf,
                endereco_de(payload, &cep),
                payload.ativo,
                &portal_token,
            )
            .await
    }

    pub async fn listar(&self, id_usuario: Uuid) -> Result<Vec<Locatario>, AppError> {
        self.locatario_repo.get_all(self.locatario_repo.pool(), id_usuario).await
    }

    pub async fn buscar(&self, id_usuario: Uuid, id: Uuid) -> Result<Locatario, AppError> {
        self.locatario_repo
            .find_by_id(self.locatario_repo.pool(), id_usuario, id)
            .await?
            .ok_or(AppError::LocatarioNaoEncontrado)
    }

    pub async fn atualizar(
        &self,
        id_usuario: Uuid,
        id: Uuid,
        payload: &LocatarioPayload,
    ) -> Result<Locatario, AppError> {
        let cpf = apenas_digitos(&payload.cpf);
        let whatsapp = normalizar_whatsapp(&payload.whatsapp);
        let cep = payload.cep.as_deref().map(apenas_digitos);

        self.locatario_repo
            .update(
                self.locatario_repo.pool(),
                id_usuario,
                id,
                payload.nome_completo.trim(),
                &whatsapp,
                payload.email.as_deref(),
                payload.documento,
                &cpf,
                endereco_de(payload, &cep),
                payload.ativo,
            )
            .await
    }

    pub async fn excluir(&self, id_usuario: Uuid, id: Uuid) -> Result<(), AppError> {
        self.locatario_repo.delete(self.locatario_repo.pool(), id_usuario, id).await
    }

    // =========================================================================
    //  PORTAL DO LOCATÁRIO (público, autenticado pelo token opaco)
    // =========================================================================

    pub async fn portal(
        &self,
        portal_token: &str,
        de: Option<chrono::NaiveDate>,
        ate: Option<chrono::NaiveDate>,
    ) -> Result<PortalView, AppError> {
        let locatario = self
            .locatario_repo
            .find_by_portal_token(self.locatario_repo.pool(), portal_token)
            .await?
            .ok_or(AppError::PortalTokenInvalido)?;

        let cobrancas = self
            .cobranca_repo
            .get_by_locatario(self.cobranca_repo.pool(), locatario.id, de, ate)
            .await?;

        let agora = chrono::Utc::now();
        let cobrancas = cobrancas
            .into_iter()
            .map(|c| cobranca_service::anexar_expiracao(c, agora))
            .collect();

        Ok(PortalView { locatario, cobrancas })
    }
}

fn endereco_de<'a>(payload: &'a LocatarioPayload, cep: &'a Option<String>) -> EnderecoParams<'a> {
    EnderecoParams {
        cep: cep.as_deref(),
        rua: payload.rua.as_deref(),
        numero: payload.numero.as_deref(),
        bairro: payload.bairro.as_deref(),
        cidade: payload.cidade.as_deref(),
        estado: payload.estado.as_deref(),
    }
}
