// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::user_repo::UserRepository,
    models::auth::{Claims, Usuario},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self { user_repo, jwt_secret, pool }
    }

    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        nome_completo: Option<&str>,
    ) -> Result<String, AppError> {
        // Hashing fora do executor async (bcrypt é CPU-bound)
        let password_clone = password.to_owned();
        let senha_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let usuario = self
            .user_repo
            .create(&self.pool, email, &senha_hash, nome_completo)
            .await?;

        tracing::info!("✅ Novo usuário registrado: {}", usuario.email);
        self.create_token(usuario.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let usuario = self
            .user_repo
            .find_by_email(&self.pool, email)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        let password_clone = password.to_owned();
        let senha_hash_clone = usuario.senha_hash.clone();

        let senha_valida =
            tokio::task::spawn_blocking(move || verify(&password_clone, &senha_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::CredenciaisInvalidas);
        }

        // Conta desativada pelo admin não entra, mesmo com a senha certa
        if !usuario.ativo {
            return Err(AppError::AcessoNegado);
        }

        self.create_token(usuario.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalido)?;

        let usuario = self
            .user_repo
            .find_by_id(&self.pool, token_data.claims.sub)
            .await?
            .ok_or(AppError::UsuarioNaoEncontrado)?;

        if !usuario.ativo {
            return Err(AppError::AcessoNegado);
        }

        Ok(usuario)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // =========================================================================
    //  ADMINISTRAÇÃO (role = admin, checada no middleware)
    // =========================================================================

    pub async fn listar_usuarios(&self) -> Result<Vec<Usuario>, AppError> {
        self.user_repo.get_all(&self.pool).await
    }

    pub async fn definir_ativo(&self, id: Uuid, ativo: bool) -> Result<Usuario, AppError> {
        let usuario = self.user_repo.set_ativo(&self.pool, id, ativo).await?;
        tracing::info!("🔑 Conta {} {}", usuario.email, if ativo { "reativada" } else { "desativada" });
        Ok(usuario)
    }

    pub async fn excluir_usuario(&self, id: Uuid) -> Result<(), AppError> {
        self.user_repo.delete(&self.pool, id).await
    }
}
