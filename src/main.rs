// src/main.rs

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Config},
    docs::ApiDoc,
    handlers::{
        admin, auth, cobrancas, configuracoes, contratos, dashboard, locatarios, mensagens,
        portal, triagem, veiculos,
    },
    middleware::auth::{admin_middleware, auth_middleware},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sga_backend=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Migrações embutidas no binário: o esquema sobe junto com o serviço
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações aplicadas");

    let rotas_publicas = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/portal/{token}", get(portal::portal));

    let rotas_admin = Router::new()
        .route("/api/admin/usuarios", get(admin::list_usuarios))
        .route("/api/admin/usuarios/{id}/status", patch(admin::set_ativo))
        .route("/api/admin/usuarios/{id}", delete(admin::delete_usuario))
        .route_layer(axum_middleware::from_fn(admin_middleware));

    let rotas_protegidas = Router::new()
        .route("/api/usuarios/me", get(auth::me))
        .route("/api/locatarios", post(locatarios::create).get(locatarios::list))
        .route(
            "/api/locatarios/{id}",
            get(locatarios::get_by_id).put(locatarios::update).delete(locatarios::delete),
        )
        .route("/api/veiculos", post(veiculos::create).get(veiculos::list))
        .route(
            "/api/veiculos/{id}",
            get(veiculos::get_by_id).put(veiculos::update).delete(veiculos::delete),
        )
        .route("/api/contratos", post(contratos::create).get(contratos::list))
        .route("/api/contratos/veiculos-disponiveis", get(contratos::veiculos_disponiveis))
        .route(
            "/api/contratos/{id}",
            get(contratos::get_by_id).put(contratos::update).delete(contratos::delete),
        )
        .route("/api/contratos/{id}/status", patch(contratos::set_status))
        .route("/api/cobrancas", get(cobrancas::list))
        .route("/api/cobrancas/manual", post(cobrancas::lancamento_manual))
        .route("/api/cobrancas/{id}", delete(cobrancas::delete))
        .route("/api/cobrancas/{id}/baixa", post(cobrancas::dar_baixa))
        .route("/api/cobrancas/{id}/registrar-envio", post(cobrancas::registrar_envio))
        .route("/api/dashboard/resumo", get(dashboard::resumo))
        .route("/api/mensagens", get(mensagens::list).put(mensagens::save))
        .route("/api/triagem", post(triagem::create).get(triagem::list))
        .route("/api/triagem/{id}", delete(triagem::delete))
        .route("/api/triagem/{id}/status", patch(triagem::update_status))
        .route("/api/configuracoes", get(configuracoes::get).put(configuracoes::save))
        .route(
            "/api/configuracoes/whatsapp/verificar",
            post(configuracoes::verificar_whatsapp),
        )
        .merge(rotas_admin)
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(rotas_publicas)
        .merge(rotas_protegidas)
        .with_state(app_state);

    let endereco = format!("0.0.0.0:{}", config.porta);
    let listener = tokio::net::TcpListener::bind(&endereco).await?;
    tracing::info!("🚀 Servidor no ar em http://{}", endereco);

    axum::serve(listener, app).await?;

    Ok(())
}
