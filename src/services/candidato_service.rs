// src/services/candidato_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, formatters::apenas_digitos},
    db::candidato_repo::CandidatoRepository,
    models::candidato::{AtualizarStatusCandidatoPayload, Candidato, CandidatoPayload},
};

// Um candidato só ganha carimbo de data quando a reserva é confirmada
const STATUS_RESERVA_CONFIRMADA: &str = "Reserva Confirmada";

#[derive(Clone)]
pub struct CandidatoService {
    candidato_repo: CandidatoRepository,
}

impl CandidatoService {
    pub fn new(candidato_repo: CandidatoRepository) -> Self {
        Self { candidato_repo }
    }

    pub async fn criar(
        &self,
        id_usuario: Uuid,
        payload: &CandidatoPayload,
    ) -> Result<Candidato, AppError> {
        let cpf = payload.cpf.as_deref().map(apenas_digitos);
        let telefone = payload.telefone.as_deref().map(apenas_digitos);

        self.candidato_repo
            .create(
                self.candidato_repo.pool(),
                id_usuario,
                payload.nome.trim(),
                telefone.as_deref(),
                cpf.as_deref(),
                payload.score_formulario,
            )
            .await
    }

    pub async fn listar(&self, id_usuario: Uuid) -> Result<Vec<Candidato>, AppError> {
        self.candidato_repo.get_all(self.candidato_repo.pool(), id_usuario).await
    }

    pub async fn atualizar_status(
        &self,
        id_usuario: Uuid,
        id: Uuid,
        payload: &AtualizarStatusCandidatoPayload,
    ) -> Result<Candidato, AppError> {
        let confirma_reserva = payload.status == STATUS_RESERVA_CONFIRMADA;
        self.candidato_repo
            .update_status(
                self.candidato_repo.pool(),
                id_usuario,
                id,
                &payload.status,
                confirma_reserva,
            )
            .await
    }

    pub async fn excluir(&self, id_usuario: Uuid, id: Uuid) -> Result<(), AppError> {
        self.candidato_repo.delete(self.candidato_repo.pool(), id_usuario, id).await
    }
}
