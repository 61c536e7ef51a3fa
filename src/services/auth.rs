// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use validator::Validate;

use crate::{
    common::{db_utils::new_record_id, error::AppError},
    db::UserRepository,
    models::auth::{Claims, CreateUserPayload, User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            jwt_secret,
            bcrypt_cost,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    /// Cria o admin inicial quando a lista de usuários está vazia.
    pub async fn ensure_default_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if !self.user_repo.is_empty() {
            return Ok(false);
        }
        self.create_user(CreateUserPayload {
            username: username.to_string(),
            password: password.to_string(),
            role: UserRole::Admin,
        })
        .await?;
        tracing::warn!(username, "🔑 Usuário admin padrão criado; troque a senha");
        Ok(true)
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User, AppError> {
        payload.validate()?;
        let password_hash = self.hash_password(&payload.password).await?;

        let user = self.user_repo.create_user(User {
            id: new_record_id(),
            username: payload.username.trim().to_string(),
            password_hash,
            role: payload.role,
            created_at: Utc::now(),
        })?;
        tracing::info!(username = %user.username, role = ?user.role, "👤 Usuário criado");
        Ok(user)
    }

    pub fn list_users(&self) -> Vec<User> {
        self.user_repo.list()
    }

    pub fn delete_user(&self, id: &str) -> Result<(), AppError> {
        self.user_repo.remove(id)?;
        Ok(())
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&user.id)
    }

    pub fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(&token_data.claims.sub)
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{JsonStore, MemoryStore};
    use std::sync::Arc;

    // Custo mínimo aceito pelo bcrypt
    const TEST_COST: u32 = 4;

    fn service() -> AuthService {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        AuthService::new(UserRepository::new(store), "segredo-de-teste".into(), TEST_COST)
    }

    #[tokio::test]
    async fn default_admin_is_seeded_once() {
        let auth = service();
        assert!(auth.ensure_default_admin("admin", "admin123").await.unwrap());
        assert!(!auth.ensure_default_admin("admin", "admin123").await.unwrap());

        let users = auth.list_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, UserRole::Admin);
        assert_ne!(users[0].password_hash, "admin123");
    }

    #[tokio::test]
    async fn login_issues_a_token_for_the_user() {
        let auth = service();
        auth.ensure_default_admin("admin", "admin123").await.unwrap();

        let token = auth.login_user("ADMIN", "admin123").await.unwrap();
        let user = auth.validate_token(&token).unwrap();
        assert_eq!(user.username, "admin");

        assert!(matches!(
            auth.login_user("admin", "errada").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login_user("ninguem", "admin123").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(auth.validate_token("lixo"), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let auth = service();
        let payload = || CreateUserPayload {
            username: "maria".into(),
            password: "senha123".into(),
            role: UserRole::Hr,
        };
        auth.create_user(payload()).await.unwrap();
        assert!(matches!(
            auth.create_user(payload()).await,
            Err(AppError::UsernameAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn token_of_a_deleted_user_is_rejected() {
        let auth = service();
        let user = auth
            .create_user(CreateUserPayload {
                username: "joao".into(),
                password: "senha123".into(),
                role: UserRole::Manager,
            })
            .await
            .unwrap();
        let token = auth.login_user("joao", "senha123").await.unwrap();
        auth.delete_user(&user.id).unwrap();
        assert!(matches!(auth.validate_token(&token), Err(AppError::UserNotFound)));
    }
}
