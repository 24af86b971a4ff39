use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Cada variante mapeia para um membro da taxonomia: validação, não
// encontrado, conflito de restrição, conflito de concorrência ou falha
// do banco.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Recorrência inválida: {0}")]
    RecorrenciaInvalida(String),

    // Pedido malformado além do que o `validator` cobre (ex: receita
    // sem locatário)
    #[error("{0}")]
    RequisicaoInvalida(String),

    #[error("E-mail já existe")]
    EmailJaExiste,

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("Usuário não encontrado")]
    UsuarioNaoEncontrado,

    #[error("Locatário não encontrado")]
    LocatarioNaoEncontrado,

    #[error("Veículo não encontrado")]
    VeiculoNaoEncontrado,

    #[error("Contrato não encontrado")]
    ContratoNaoEncontrado,

    #[error("Cobrança não encontrada")]
    CobrancaNaoEncontrada,

    #[error("Candidato não encontrado")]
    CandidatoNaoEncontrado,

    // O link do portal carrega um token opaco; token desconhecido é um
    // erro recuperável de cara pro usuário, não uma falha do sistema.
    #[error("Link de acesso inválido")]
    PortalTokenInvalido,

    #[error("Não encontramos nenhuma fatura PENDENTE para este locatário para somar o valor")]
    FaturaPendenteNaoEncontrada,

    // Conflitos de restrição, já traduzidos para o campo violado.
    #[error("Documento já cadastrado para outro cliente")]
    DocumentoJaCadastrado,

    #[error("WhatsApp já cadastrado para outro cliente")]
    WhatsappJaCadastrado,

    #[error("Placa já cadastrada")]
    PlacaJaCadastrada,

    #[error("Este veículo já possui um contrato ativo")]
    VeiculoJaAlugado,

    #[error("Exclusão bloqueada: existem registros vinculados")]
    ExclusaoBloqueada,

    #[error("Esta cobrança já foi paga")]
    CobrancaJaPaga,

    // Pré-condição otimista falhou (ex: a fatura deixou de estar
    // pendente entre a busca e o update). O chamador deve recarregar
    // e tentar de novo.
    #[error("O registro foi alterado por outra operação. Recarregue e tente novamente")]
    ConflitoDeConcorrencia,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Traduz uma violação de restrição do Postgres para a variante com
    /// atribuição de campo, quando a restrição é conhecida. Violações de
    /// chave estrangeira (23503) viram `ExclusaoBloqueada`.
    pub fn from_constraint(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return match db_err.constraint().unwrap_or_default() {
                    "usuarios_email_key" => AppError::EmailJaExiste,
                    "locatarios_cpf_key" => AppError::DocumentoJaCadastrado,
                    "locatarios_whatsapp_key" => AppError::WhatsappJaCadastrado,
                    "veiculos_placa_key" => AppError::PlacaJaCadastrada,
                    "contratos_veiculo_ativo_key" => AppError::VeiculoJaAlugado,
                    _ => AppError::DatabaseError(err),
                };
            }
            if db_err.is_foreign_key_violation() {
                return AppError::ExclusaoBloqueada;
            }
        }
        AppError::DatabaseError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            ref e @ (AppError::RecorrenciaInvalida(_) | AppError::RequisicaoInvalida(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }

            AppError::CredenciaisInvalidas => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::AcessoNegado => (
                StatusCode::FORBIDDEN,
                "Apenas administradores podem acessar esta área.".to_string(),
            ),

            ref e @ (AppError::UsuarioNaoEncontrado
            | AppError::LocatarioNaoEncontrado
            | AppError::VeiculoNaoEncontrado
            | AppError::ContratoNaoEncontrado
            | AppError::CobrancaNaoEncontrada
            | AppError::CandidatoNaoEncontrado
            | AppError::PortalTokenInvalido
            | AppError::FaturaPendenteNaoEncontrada) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }

            ref e @ (AppError::EmailJaExiste
            | AppError::DocumentoJaCadastrado
            | AppError::WhatsappJaCadastrado
            | AppError::PlacaJaCadastrada
            | AppError::VeiculoJaAlugado
            | AppError::ExclusaoBloqueada
            | AppError::CobrancaJaPaga
            | AppError::ConflitoDeConcorrencia) => (StatusCode::CONFLICT, e.to_string()),

            // Todos os outros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
