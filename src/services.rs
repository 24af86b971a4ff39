pub mod auth;
pub mod candidato_service;
pub mod cobranca_service;
pub mod configuracao_service;
pub mod contrato_service;
pub mod dashboard_service;
pub mod locatario_service;
pub mod mensagem_service;
pub mod recorrencia;
pub mod veiculo_service;
