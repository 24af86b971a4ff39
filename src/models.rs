pub mod auth;
pub mod candidato;
pub mod cobranca;
pub mod configuracao;
pub mod contrato;
pub mod dashboard;
pub mod locatario;
pub mod mensagem;
pub mod veiculo;
