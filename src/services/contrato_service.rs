// src/services/contrato_service.rs
//
// Ciclo de vida do contrato e a validação de alocação da frota: um
// veículo nunca pode ter dois contratos ativos ao mesmo tempo. A defesa
// final é o índice parcial único do banco; o filtro de disponibilidade
// aqui existe para o formulário nem oferecer o veículo ocupado.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        cobranca_repo::CobrancaRepository, contrato_repo::ContratoRepository,
        locatario_repo::LocatarioRepository, veiculo_repo::VeiculoRepository,
    },
    models::{
        cobranca::{StatusCobranca, TipoCobranca},
        contrato::{Contrato, ContratoDetalhe, ContratoPayload, Recorrencia, StatusContrato},
        veiculo::Veiculo,
    },
    services::recorrencia,
};

#[derive(Clone)]
pub struct ContratoService {
    contrato_repo: ContratoRepository,
    cobranca_repo: CobrancaRepository,
    locatario_repo: LocatarioRepository,
    veiculo_repo: VeiculoRepository,
    pool: PgPool,
}

impl ContratoService {
    pub fn new(
        contrato_repo: ContratoRepository,
        cobranca_repo: CobrancaRepository,
        locatario_repo: LocatarioRepository,
        veiculo_repo: VeiculoRepository,
        pool: PgPool,
    ) -> Self {
        Self { contrato_repo, cobranca_repo, locatario_repo, veiculo_repo, pool }
    }

    /// Cria o contrato e, se ele nasce ativo, a primeira fatura junto,
    /// na MESMA transação: ou o locatário começa com contrato e fatura,
    /// ou com nada.
    pub async fn criar(
        &self,
        id_usuario: Uuid,
        payload: &ContratoPayload,
    ) -> Result<Contrato, AppError> {
        let rec: Recorrencia = payload
            .recorrencia
            .parse()
            .map_err(AppError::RecorrenciaInvalida)?;

        self.conferir_referencias(id_usuario, payload.id_locatario, payload.id_veiculo)
            .await?;

        let proxima = recorrencia::primeira_cobranca(&rec, payload.data_inicio);

        let mut tx = self.pool.begin().await?;

        let contrato = self
            .contrato_repo
            .create(
                &mut *tx,
                id_usuario,
                payload.id_locatario,
                payload.id_veiculo,
                payload.valor,
                &rec.to_string(),
                payload.status,
                payload.data_inicio,
                proxima,
            )
            .await?;

        if contrato.status == StatusContrato::Ativo {
            self.cobranca_repo
                .create(
                    &mut *tx,
                    id_usuario,
                    Some(contrato.id),
                    Some(contrato.id_locatario),
                    contrato.valor,
                    TipoCobranca::Receita,
                    "aluguel",
                    StatusCobranca::Pendente,
                    contrato.data_inicio,
                    false,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!("📝 Contrato {} criado para o veículo {}", contrato.id, contrato.id_veiculo);
        Ok(contrato)
    }

    // As FKs pegariam referências quebradas, mas com erro genérico;
    // checar antes devolve 404 com o nome do recurso
    async fn conferir_referencias(
        &self,
        id_usuario: Uuid,
        id_locatario: Uuid,
        id_veiculo: Uuid,
    ) -> Result<(), AppError> {
        self.locatario_repo
            .find_by_id(&self.pool, id_usuario, id_locatario)
            .await?
            .ok_or(AppError::LocatarioNaoEncontrado)?;
        self.veiculo_repo
            .find_by_id(&self.pool, id_usuario, id_veiculo)
            .await?
            .ok_or(AppError::VeiculoNaoEncontrado)?;
        Ok(())
    }

    pub async fn listar(&self, id_usuario: Uuid) -> Result<Vec<ContratoDetalhe>, AppError> {
        self.contrato_repo.get_all_detalhado(&self.pool, id_usuario).await
    }

    pub async fn buscar(&self, id_usuario: Uuid, id: Uuid) -> Result<Contrato, AppError> {
        self.contrato_repo
            .find_by_id(&self.pool, id_usuario, id)
            .await?
            .ok_or(AppError::ContratoNaoEncontrado)
    }

    /// Edição completa. Se a recorrência ou a data de início mudarem, o
    /// próximo vencimento é recalculado do zero; senão fica como está
    /// (o job de faturamento é quem o avança).
    pub async fn atualizar(
        &self,
        id_usuario: Uuid,
        id: Uuid,
        payload: &ContratoPayload,
    ) -> Result<Contrato, AppError> {
        let rec: Recorrencia = payload
            .recorrencia
            .parse()
            .map_err(AppError::RecorrenciaInvalida)?;

        let atual = self.buscar(id_usuario, id).await?;

        self.conferir_referencias(id_usuario, payload.id_locatario, payload.id_veiculo)
            .await?;

        let proxima = if atual.recorrencia != rec.to_string() || atual.data_inicio != payload.data_inicio {
            recorrencia::primeira_cobranca(&rec, payload.data_inicio)
        } else {
            atual.proxima_cobranca
        };

        self.contrato_repo
            .update(
                &self.pool,
                id_usuario,
                id,
                payload.id_locatario,
                payload.id_veiculo,
                payload.valor,
                &rec.to_string(),
                payload.status,
                payload.data_inicio,
                proxima,
            )
            .await
    }

    /// Pausar/reativar. A pausa NÃO toca nas cobranças já emitidas:
    /// fatura em aberto continua em aberto, só a geração futura para.
    pub async fn definir_status(
        &self,
        id_usuario: Uuid,
        id: Uuid,
        status: StatusContrato,
    ) -> Result<Contrato, AppError> {
        self.contrato_repo.set_status(&self.pool, id_usuario, id, status).await
    }

    pub async fn excluir(&self, id_usuario: Uuid, id: Uuid) -> Result<(), AppError> {
        self.contrato_repo.delete(&self.pool, id_usuario, id).await
    }

    /// Veículos oferecíveis num formulário de contrato: os ativos que não
    /// estão presos a outro contrato ativo. Na edição, o veículo do
    /// próprio contrato continua aparecendo.
    pub async fn veiculos_disponiveis(
        &self,
        id_usuario: Uuid,
        contrato_em_edicao: Option<Uuid>,
    ) -> Result<Vec<Veiculo>, AppError> {
        let veiculos = self.veiculo_repo.get_all(&self.pool, id_usuario).await?;
        let ocupados = self
            .contrato_repo
            .veiculos_com_contrato_ativo(&self.pool, id_usuario)
            .await?;

        Ok(filtrar_disponiveis(veiculos, &ocupados, contrato_em_edicao))
    }
}

// Filtro puro de disponibilidade: `ocupados` são pares
// (id_veiculo, id_contrato) dos contratos ativos
fn filtrar_disponiveis(
    veiculos: Vec<Veiculo>,
    ocupados: &[(Uuid, Uuid)],
    contrato_em_edicao: Option<Uuid>,
) -> Vec<Veiculo> {
    veiculos
        .into_iter()
        .filter(|v| v.ativo)
        .filter(|v| {
            !ocupados.iter().any(|(id_veiculo, id_contrato)| {
                *id_veiculo == v.id && Some(*id_contrato) != contrato_em_edicao
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn veiculo(id: Uuid, ativo: bool) -> Veiculo {
        Veiculo {
            id,
            id_usuario: Uuid::new_v4(),
            placa: "ABC1D23".into(),
            modelo: "Onix 1.0".into(),
            marca: None,
            cor: None,
            ano: Some(2020),
            ativo,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn veiculo_com_contrato_ativo_fica_de_fora() {
        let livre = Uuid::new_v4();
        let preso = Uuid::new_v4();
        let ocupados = vec![(preso, Uuid::new_v4())];

        let disponiveis =
            filtrar_disponiveis(vec![veiculo(livre, true), veiculo(preso, true)], &ocupados, None);

        assert_eq!(disponiveis.len(), 1);
        assert_eq!(disponiveis[0].id, livre);
    }

    #[test]
    fn na_edicao_o_veiculo_do_proprio_contrato_aparece() {
        let preso = Uuid::new_v4();
        let meu_contrato = Uuid::new_v4();
        let ocupados = vec![(preso, meu_contrato)];

        let sem_excecao = filtrar_disponiveis(vec![veiculo(preso, true)], &ocupados, None);
        assert!(sem_excecao.is_empty());

        let na_edicao =
            filtrar_disponiveis(vec![veiculo(preso, true)], &ocupados, Some(meu_contrato));
        assert_eq!(na_edicao.len(), 1);
    }

    #[test]
    fn veiculo_de_outro_contrato_continua_fora_mesmo_na_edicao() {
        let preso = Uuid::new_v4();
        let outro_contrato = Uuid::new_v4();
        let ocupados = vec![(preso, outro_contrato)];

        let disponiveis =
            filtrar_disponiveis(vec![veiculo(preso, true)], &ocupados, Some(Uuid::new_v4()));
        assert!(disponiveis.is_empty());
    }

    #[test]
    fn veiculo_inativo_nunca_aparece() {
        let inativo = Uuid::new_v4();
        let disponiveis = filtrar_disponiveis(vec![veiculo(inativo, false)], &[], None);
        assert!(disponiveis.is_empty());
    }

    // Teste de integração contra um Postgres real (DATABASE_URL). Rodar
    // com `cargo test -- --ignored` depois de subir o banco.

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn pool_de_teste() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL para os testes");
        PgPool::connect(&url).await.expect("conexão com o Postgres de teste")
    }

    fn servico_de_teste(pool: &PgPool) -> ContratoService {
        ContratoService::new(
            ContratoRepository::new(pool.clone()),
            CobrancaRepository::new(pool.clone()),
            LocatarioRepository::new(pool.clone()),
            VeiculoRepository::new(pool.clone()),
            pool.clone(),
        )
    }

    // Conta + locatário + veículo descartáveis para cada teste
    async fn seed(pool: &PgPool) -> (Uuid, Uuid, Uuid) {
        let id_usuario: Uuid = sqlx::query_scalar(
            "INSERT INTO usuarios (email, senha_hash) VALUES ($1, 'x') RETURNING id",
        )
        .bind(format!("{}@teste.local", Uuid::new_v4().simple()))
        .fetch_one(pool)
        .await
        .unwrap();

        let id_locatario: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO locatarios (id_usuario, nome_completo, whatsapp, cpf, portal_token)
            VALUES ($1, 'Locatário de Teste', $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(id_usuario)
        .bind(format!("55{}", &Uuid::new_v4().simple().to_string()[..11]))
        .bind(Uuid::new_v4().simple().to_string())
        .bind(Uuid::new_v4().simple().to_string())
        .fetch_one(pool)
        .await
        .unwrap();

        let id_veiculo: Uuid = sqlx::query_scalar(
            "INSERT INTO veiculos (id_usuario, placa, modelo) VALUES ($1, $2, 'Onix 1.0') RETURNING id",
        )
        .bind(id_usuario)
        .bind(Uuid::new_v4().simple().to_string()[..7].to_uppercase())
        .fetch_one(pool)
        .await
        .unwrap();

        (id_usuario, id_locatario, id_veiculo)
    }

    fn payload(id_locatario: Uuid, id_veiculo: Uuid) -> ContratoPayload {
        ContratoPayload {
            id_locatario,
            id_veiculo,
            valor: dec!(300.00),
            recorrencia: "weekly@mon@20:00".into(),
            status: StatusContrato::Ativo,
            data_inicio: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    #[ignore = "precisa de um Postgres com as migrações aplicadas"]
    async fn atualizar_com_referencia_quebrada_devolve_nao_encontrado() {
        let pool = pool_de_teste().await;
        let servico = servico_de_teste(&pool);
        let (id_usuario, id_locatario, id_veiculo) = seed(&pool).await;

        let contrato = servico
            .criar(id_usuario, &payload(id_locatario, id_veiculo))
            .await
            .unwrap();

        let erro = servico
            .atualizar(id_usuario, contrato.id, &payload(id_locatario, Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::VeiculoNaoEncontrado));

        let erro = servico
            .atualizar(id_usuario, contrato.id, &payload(Uuid::new_v4(), id_veiculo))
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::LocatarioNaoEncontrado));

        // E a edição legítima continua passando
        let ok = servico
            .atualizar(id_usuario, contrato.id, &payload(id_locatario, id_veiculo))
            .await;
        assert!(ok.is_ok());
    }
}
