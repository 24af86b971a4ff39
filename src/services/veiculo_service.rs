// src/services/veiculo_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::veiculo_repo::VeiculoRepository,
    models::veiculo::{Veiculo, VeiculoPayload},
};

#[derive(Clone)]
pub struct VeiculoService {
    veiculo_repo: VeiculoRepository,
}

impl VeiculoService {
    pub fn new(veiculo_repo: VeiculoRepository) -> Self {
        Self { veiculo_repo }
    }

    pub async fn criar(
        &self,
        id_usuario: Uuid,
        payload: &VeiculoPayload,
    ) -> Result<Veiculo, AppError> {
        // Placa normalizada para não depender de caixa na restrição única
        let placa = payload.placa.trim().to_uppercase();

        self.veiculo_repo
            .create(
                self.veiculo_repo.pool(),
                id_usuario,
                &placa,
                payload.modelo.trim(),
                payload.marca.as_deref(),
                payload.cor.as_deref(),
                payload.ano,
                payload.ativo,
            )
            .await
    }

    pub async fn listar(&self, id_usuario: Uuid) -> Result<Vec<Veiculo>, AppError> {
        self.veiculo_repo.get_all(self.veiculo_repo.pool(), id_usuario).await
    }

    pub async fn buscar(&self, id_usuario: Uuid, id: Uuid) -> Result<Veiculo, AppError> {
        self.veiculo_repo
            .find_by_id(self.veiculo_repo.pool(), id_usuario, id)
            .await?
            .ok_or(AppError::VeiculoNaoEncontrado)
    }

    pub async fn atualizar(
        &self,
        id_usuario: Uuid,
        id: Uuid,
        payload: &VeiculoPayload,
    ) -> Result<Veiculo, AppError> {
        let placa = payload.placa.trim().to_uppercase();

        self.veiculo_repo
            .update(
                self.veiculo_repo.pool(),
                id_usuario,
                id,
                &placa,
                payload.modelo.trim(),
                payload.marca.as_deref(),
                payload.cor.as_deref(),
                payload.ano,
                payload.ativo,
            )
            .await
    }

    pub async fn excluir(&self, id_usuario: Uuid, id: Uuid) -> Result<(), AppError> {
        self.veiculo_repo.delete(self.veiculo_repo.pool(), id_usuario, id).await
    }
}
