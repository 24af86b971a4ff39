// src/docs.rs

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{handlers, models, services};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::locatarios::create,
        handlers::locatarios::list,
        handlers::locatarios::get_by_id,
        handlers::locatarios::update,
        handlers::locatarios::delete,
        handlers::veiculos::create,
        handlers::veiculos::list,
        handlers::veiculos::get_by_id,
        handlers::veiculos::update,
        handlers::veiculos::delete,
        handlers::contratos::create,
        handlers::contratos::list,
        handlers::contratos::veiculos_disponiveis,
        handlers::contratos::get_by_id,
        handlers::contratos::update,
        handlers::contratos::set_status,
        handlers::contratos::delete,
        handlers::cobrancas::list,
        handlers::cobrancas::lancamento_manual,
        handlers::cobrancas::dar_baixa,
        handlers::cobrancas::registrar_envio,
        handlers::cobrancas::delete,
        handlers::dashboard::resumo,
        handlers::mensagens::list,
        handlers::mensagens::save,
        handlers::triagem::create,
        handlers::triagem::list,
        handlers::triagem::update_status,
        handlers::triagem::delete,
        handlers::configuracoes::get,
        handlers::configuracoes::save,
        handlers::configuracoes::verificar_whatsapp,
        handlers::portal::portal,
        handlers::admin::list_usuarios,
        handlers::admin::set_ativo,
        handlers::admin::delete_usuario,
    ),
    components(schemas(
        models::auth::Usuario,
        models::auth::UserRole,
        models::auth::RegisterUserPayload,
        models::auth::LoginUserPayload,
        models::auth::AuthResponse,
        models::locatario::Locatario,
        models::locatario::LocatarioPayload,
        models::locatario::TipoDocumento,
        models::veiculo::Veiculo,
        models::veiculo::VeiculoPayload,
        models::contrato::Contrato,
        models::contrato::ContratoDetalhe,
        models::contrato::ContratoPayload,
        models::contrato::StatusContrato,
        models::cobranca::Cobranca,
        models::cobranca::CobrancaDetalhe,
        models::cobranca::CobrancaComExpiracao,
        models::cobranca::Expiracao,
        models::cobranca::LancamentoManualPayload,
        models::cobranca::DestinoLancamento,
        models::cobranca::TipoCobranca,
        models::cobranca::StatusCobranca,
        models::dashboard::DashboardResumo,
        models::dashboard::ResumoFinanceiro,
        models::mensagem::MensagemTemplate,
        models::mensagem::TemplateItemPayload,
        models::mensagem::SalvarTemplatesPayload,
        models::candidato::Candidato,
        models::candidato::CandidatoPayload,
        models::candidato::AtualizarStatusCandidatoPayload,
        models::configuracao::Configuracoes,
        models::configuracao::ConfiguracoesPayload,
        models::configuracao::ConexaoWhatsapp,
        services::locatario_service::PortalView,
        handlers::contratos::StatusPayload,
        handlers::admin::AtivoPayload,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro e login"),
        (name = "Locatários", description = "Cadastro de locatários"),
        (name = "Veículos", description = "Cadastro da frota"),
        (name = "Contratos", description = "Contratos de aluguel e disponibilidade"),
        (name = "Cobranças", description = "Faturas, lançamentos e baixas"),
        (name = "Dashboard", description = "Indicadores do painel"),
        (name = "Mensagens", description = "Régua de lembretes do WhatsApp"),
        (name = "Triagem", description = "Candidatos a locatário"),
        (name = "Configurações", description = "Conta e integrações"),
        (name = "Portal", description = "Portal público do locatário"),
        (name = "Admin", description = "Administração da plataforma"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
