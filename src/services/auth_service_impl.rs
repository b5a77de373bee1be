//! In-memory implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::models::User;
use crate::plans::PlanTier;
use crate::services::auth_service::{AuthError, AuthService, AuthSession, SignupRequest};

pub struct MemoryAuthService {
    store: Store,
    min_password_length: usize,
}

impl MemoryAuthService {
    #[must_use]
    pub const fn new(store: Store, min_password_length: usize) -> Self {
        Self {
            store,
            min_password_length,
        }
    }

    fn validate_signup(&self, request: &SignupRequest) -> Result<(), AuthError> {
        if request.email.trim().is_empty()
            || request.password.is_empty()
            || request.confirm_password.is_empty()
        {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        if !request.email.contains('@') {
            return Err(AuthError::Validation("Email address is invalid".to_string()));
        }

        if request.password != request.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        if request.password.chars().count() < self.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl AuthService for MemoryAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = self
            .store
            .users()
            .verify_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.store.users().issue_token(&user.id).await;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { token, user })
    }

    async fn signup(&self, request: SignupRequest) -> Result<AuthSession, AuthError> {
        self.validate_signup(&request)?;

        let email = request.email.trim();
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(
                || email.split('@').next().unwrap_or(email).to_string(),
                ToString::to_string,
            );

        let user = self
            .store
            .users()
            .create(email, &name, &request.password, PlanTier::Free)
            .await?
            .ok_or(AuthError::EmailTaken)?;

        let token = self.store.users().issue_token(&user.id).await;
        info!(user_id = %user.id, "User signed up");

        Ok(AuthSession { token, user })
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if !self.store.users().revoke_token(token).await {
            debug!("Logout with unknown token");
        }
        Ok(())
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        self.store
            .users()
            .user_for_token(token)
            .await
            .ok_or(AuthError::Unauthorized)
    }

    async fn change_plan(&self, user_id: &str, plan: PlanTier) -> Result<User, AuthError> {
        let user = self
            .store
            .users()
            .set_plan(user_id, plan)
            .await
            .ok_or(AuthError::UserNotFound)?;

        info!(user_id = %user.id, plan = %plan, "Plan changed");
        Ok(user)
    }

    async fn ensure_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        plan: PlanTier,
    ) -> Result<User, AuthError> {
        if let Some(existing) = self.store.users().get_by_email(email).await {
            return Ok(existing);
        }

        match self.store.users().create(email, name, password, plan).await? {
            Some(user) => Ok(user),
            None => self
                .store
                .users()
                .get_by_email(email)
                .await
                .ok_or(AuthError::UserNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;

    fn service() -> MemoryAuthService {
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        };
        MemoryAuthService::new(Store::new(security), 6)
    }

    fn signup(email: &str, password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            name: None,
        }
    }

    #[tokio::test]
    async fn test_signup_defaults() {
        let auth = service();
        let session = auth
            .signup(signup("jane@example.com", "secret1", "secret1"))
            .await
            .unwrap();

        assert_eq!(session.user.name, "jane");
        assert_eq!(session.user.plan, PlanTier::Free);
        assert_eq!(auth.authenticate(&session.token).await.unwrap().id, session.user.id);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let auth = service();

        assert!(matches!(
            auth.signup(signup("", "secret1", "secret1")).await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.signup(signup("x@example.com", "secret1", "secret2")).await,
            Err(AuthError::Validation(msg)) if msg == "Passwords do not match"
        ));
        assert!(matches!(
            auth.signup(signup("x@example.com", "abc", "abc")).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_signup_duplicate() {
        let auth = service();
        auth.signup(signup("dup@example.com", "secret1", "secret1"))
            .await
            .unwrap();
        assert!(matches!(
            auth.signup(signup("dup@example.com", "secret1", "secret1")).await,
            Err(AuthError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_login_logout() {
        let auth = service();
        auth.ensure_user("demo@example.com", "Demo", "password", PlanTier::Pro)
            .await
            .unwrap();

        assert!(matches!(
            auth.login("demo@example.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));

        let session = auth.login("demo@example.com", "password").await.unwrap();
        assert_eq!(session.user.plan, PlanTier::Pro);

        auth.logout(&session.token).await.unwrap();
        assert!(matches!(
            auth.authenticate(&session.token).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let auth = service();
        let a = auth
            .ensure_user("same@example.com", "Same", "password", PlanTier::Free)
            .await
            .unwrap();
        let b = auth
            .ensure_user("same@example.com", "Other", "different", PlanTier::Pro)
            .await
            .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(b.plan, PlanTier::Free);
    }
}
