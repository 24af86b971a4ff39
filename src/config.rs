// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        candidato_repo::CandidatoRepository, cobranca_repo::CobrancaRepository,
        contrato_repo::ContratoRepository, locatario_repo::LocatarioRepository,
        mensagem_repo::MensagemRepository, user_repo::UserRepository,
        veiculo_repo::VeiculoRepository,
    },
    services::{
        auth::AuthService, candidato_service::CandidatoService, cobranca_service::CobrancaService,
        configuracao_service::ConfiguracaoService, contrato_service::ContratoService,
        dashboard_service::DashboardService, locatario_service::LocatarioService,
        mensagem_service::MensagemService, veiculo_service::VeiculoService,
    },
};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub porta: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL não definida"))?;
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET não definida"))?;
        let porta = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Ok(Self { database_url, jwt_secret, porta })
    }
}

// O estado compartilhado da aplicação: o pool e os serviços, todos
// baratos de clonar
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub locatario_service: LocatarioService,
    pub veiculo_service: VeiculoService,
    pub contrato_service: ContratoService,
    pub cobranca_service: CobrancaService,
    pub dashboard_service: DashboardService,
    pub mensagem_service: MensagemService,
    pub candidato_service: CandidatoService,
    pub configuracao_service: ConfiguracaoService,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let db_pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(&config.database_url)
            .await?;

        let user_repo = UserRepository::new(db_pool.clone());
        let locatario_repo = LocatarioRepository::new(db_pool.clone());
        let veiculo_repo = VeiculoRepository::new(db_pool.clone());
        let contrato_repo = ContratoRepository::new(db_pool.clone());
        let cobranca_repo = CobrancaRepository::new(db_pool.clone());
        let mensagem_repo = MensagemRepository::new(db_pool.clone());
        let candidato_repo = CandidatoRepository::new(db_pool.clone());

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        let auth_service =
            AuthService::new(user_repo.clone(), config.jwt_secret.clone(), db_pool.clone());
        let locatario_service =
            LocatarioService::new(locatario_repo.clone(), cobranca_repo.clone());
        let veiculo_service = VeiculoService::new(veiculo_repo.clone());
        let contrato_service = ContratoService::new(
            contrato_repo.clone(),
            cobranca_repo.clone(),
            locatario_repo.clone(),
            veiculo_repo.clone(),
            db_pool.clone(),
        );
        let cobranca_service =
            CobrancaService::new(cobranca_repo.clone(), locatario_repo.clone(), db_pool.clone());
        let dashboard_service =
            DashboardService::new(cobranca_repo.clone(), contrato_repo.clone(), db_pool.clone());
        let mensagem_service = MensagemService::new(mensagem_repo, db_pool.clone());
        let candidato_service = CandidatoService::new(candidato_repo);
        let configuracao_service = ConfiguracaoService::new(user_repo, http, db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            locatario_service,
            veiculo_service,
            contrato_service,
            cobranca_service,
            dashboard_service,
            mensagem_service,
            candidato_service,
            configuracao_service,
        })
    }
}
