pub mod admin;
pub mod auth;
pub mod cobrancas;
pub mod configuracoes;
pub mod contratos;
pub mod dashboard;
pub mod locatarios;
pub mod mensagens;
pub mod portal;
pub mod triagem;
pub mod veiculos;
