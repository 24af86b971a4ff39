pub mod candidato_repo;
pub mod cobranca_repo;
pub mod contrato_repo;
pub mod locatario_repo;
pub mod mensagem_repo;
pub mod user_repo;
pub mod veiculo_repo;
