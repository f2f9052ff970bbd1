use std::sync::Arc;

use tracing::{info, instrument};

use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, user::Identity, user::User};
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

pub struct AuthService<R: UserRepository + ?Sized + 'static> {
    repo: Arc<R>,
    keys: JwtKeys,
}

impl<R> AuthService<R>
where
    R: UserRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: String,
        password: String,
        is_admin: bool,
    ) -> Result<User, DomainError> {
        let hash = hash_password(&password).map_err(|err| DomainError::Hashing(err.to_string()))?;
        let user = User::new(email, hash, is_admin);
        self.repo.create(user).await
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(email.to_string()))?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|err| DomainError::Hashing(err.to_string()))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .keys
            .generate_token(user.id, user.is_admin)
            .map_err(|err| DomainError::Internal(err.to_string()))?;
        info!(user_id = %user.id, "token issued");
        Ok(token)
    }

    pub fn authenticate(&self, token: &str) -> Result<Identity, DomainError> {
        Ok(self.keys.verify_token(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::InMemoryUserRepository;
    use crate::domain::error::TokenError;
    use async_trait::async_trait;

    struct UnreachableStore;

    #[async_trait]
    impl UserRepository for UnreachableStore {
        async fn create(&self, _user: User) -> Result<User, DomainError> {
            Err(DomainError::Persistence("connection reset".into()))
        }
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
            Err(DomainError::Persistence("connection reset".into()))
        }
    }

    fn service() -> AuthService<InMemoryUserRepository> {
        AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            JwtKeys::new("auth-test".into()),
        )
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let auth = service();
        let user = auth
            .register("admin@x.com".into(), "pw1".into(), true)
            .await
            .unwrap();

        assert_eq!(user.email, "admin@x.com");
        assert!(user.is_admin);
        assert_ne!(user.password_hash, "pw1");
    }

    #[tokio::test]
    async fn login_issues_token_carrying_admin_flag() {
        let auth = service();
        let admin = auth
            .register("admin@x.com".into(), "pw1".into(), true)
            .await
            .unwrap();
        let regular = auth
            .register("u@x.com".into(), "pw2".into(), false)
            .await
            .unwrap();

        let token = auth.login("admin@x.com", "pw1").await.unwrap();
        let identity = auth.authenticate(&token).unwrap();
        assert_eq!(identity.user_id, admin.id);
        assert!(identity.admin);

        let token = auth.login("u@x.com", "pw2").await.unwrap();
        let identity = auth.authenticate(&token).unwrap();
        assert_eq!(identity.user_id, regular.id);
        assert!(!identity.admin);
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let err = service().login("nobody@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(email) if email == "nobody@x.com"));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let auth = service();
        auth.register("u@x.com".into(), "pw2".into(), false)
            .await
            .unwrap();

        let err = auth.login("u@x.com", "nope").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn foreign_token_is_rejected() {
        let token = JwtKeys::new("elsewhere".into())
            .generate_token(uuid::Uuid::new_v4(), true)
            .unwrap();
        let err = service().authenticate(&token).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Token(TokenError::InvalidSignature)
        ));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let auth = AuthService::new(Arc::new(UnreachableStore), JwtKeys::new("auth-test".into()));

        let err = auth
            .register("u@x.com".into(), "pw".into(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));

        // an unreachable store must not read as an unknown email
        let err = auth.login("u@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
