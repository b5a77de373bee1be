use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task;

use crate::config::SecurityConfig;
use crate::models::User;
use crate::plans::PlanTier;

struct UserRecord {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    // lowercase email -> user id
    emails: HashMap<String, String>,
    // bearer token -> user id
    tokens: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct UserRepository {
    inner: Arc<RwLock<Inner>>,
    security: Arc<SecurityConfig>,
}

impl UserRepository {
    #[must_use]
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            inner: Arc::default(),
            security: Arc::new(security),
        }
    }

    /// Creates a user. Returns `None` when the email is already registered.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password: &str,
        plan: PlanTier,
    ) -> Result<Option<User>> {
        let key = email.trim().to_lowercase();
        if self.inner.read().await.emails.contains_key(&key) {
            return Ok(None);
        }

        let password = password.to_string();
        let security = Arc::clone(&self.security);
        // Hashing is CPU-bound; keep it off the async workers
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .context("Password hashing task panicked")??;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            name: name.to_string(),
            plan,
            download_count: 0,
            registration_date: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        // Re-check under the write lock; another signup may have won the race
        if inner.emails.contains_key(&key) {
            return Ok(None);
        }
        inner.emails.insert(key, user.id.clone());
        inner.users.insert(
            user.id.clone(),
            UserRecord {
                user: user.clone(),
                password_hash,
            },
        );

        Ok(Some(user))
    }

    pub async fn get_by_id(&self, id: &str) -> Option<User> {
        self.inner.read().await.users.get(id).map(|r| r.user.clone())
    }

    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .emails
            .get(&email.trim().to_lowercase())
            .and_then(|id| inner.users.get(id))
            .map(|r| r.user.clone())
    }

    /// Checks credentials, returning the user on success.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        let found = {
            let inner = self.inner.read().await;
            inner
                .emails
                .get(&email.trim().to_lowercase())
                .and_then(|id| inner.users.get(id))
                .map(|r| (r.user.clone(), r.password_hash.clone()))
        };

        let Some((user, password_hash)) = found else {
            return Ok(None);
        };

        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        Ok(is_valid.then_some(user))
    }

    pub async fn issue_token(&self, user_id: &str) -> String {
        let token = generate_token();
        self.inner
            .write()
            .await
            .tokens
            .insert(token.clone(), user_id.to_string());
        token
    }

    pub async fn revoke_token(&self, token: &str) -> bool {
        self.inner.write().await.tokens.remove(token).is_some()
    }

    pub async fn user_for_token(&self, token: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .tokens
            .get(token)
            .and_then(|id| inner.users.get(id))
            .map(|r| r.user.clone())
    }

    pub async fn set_plan(&self, user_id: &str, plan: PlanTier) -> Option<User> {
        let mut inner = self.inner.write().await;
        let record = inner.users.get_mut(user_id)?;
        record.user.plan = plan;
        Some(record.user.clone())
    }

    /// All users, oldest registration first.
    pub async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .inner
            .read()
            .await
            .users
            .values()
            .map(|r| r.user.clone())
            .collect();
        users.sort_by(|a, b| {
            a.registration_date
                .cmp(&b.registration_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        users
    }

    pub async fn increment_download_count(&self, user_id: &str) {
        if let Some(record) = self.inner.write().await.users.get_mut(user_id) {
            record.user.download_count += 1;
        }
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate's default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to encode salt: {e}"))?;

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a random bearer token (64 character hex string)
#[must_use]
pub fn generate_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22", Some(&fast_security())).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn test_generate_token() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = UserRepository::new(fast_security());
        let first = repo
            .create("a@example.com", "A", "secret1", PlanTier::Free)
            .await
            .unwrap();
        assert!(first.is_some());

        let second = repo
            .create("A@Example.com", "A2", "secret2", PlanTier::Pro)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_credentials_and_tokens() {
        let repo = UserRepository::new(fast_security());
        let user = repo
            .create("b@example.com", "B", "secret1", PlanTier::Free)
            .await
            .unwrap()
            .unwrap();

        assert!(
            repo.verify_credentials("b@example.com", "wrong")
                .await
                .unwrap()
                .is_none()
        );
        let verified = repo
            .verify_credentials("b@example.com", "secret1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(verified.id, user.id);

        let token = repo.issue_token(&user.id).await;
        assert_eq!(repo.user_for_token(&token).await.unwrap().id, user.id);
        assert!(repo.revoke_token(&token).await);
        assert!(repo.user_for_token(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_set_plan() {
        let repo = UserRepository::new(fast_security());
        let user = repo
            .create("c@example.com", "C", "secret1", PlanTier::Free)
            .await
            .unwrap()
            .unwrap();
        let updated = repo.set_plan(&user.id, PlanTier::Unlimited).await.unwrap();
        assert_eq!(updated.plan, PlanTier::Unlimited);
        assert!(repo.set_plan("missing", PlanTier::Pro).await.is_none());
    }

    #[tokio::test]
    async fn test_list_in_registration_order() {
        let repo = UserRepository::new(fast_security());
        for (email, plan) in [
            ("d1@example.com", PlanTier::Free),
            ("d2@example.com", PlanTier::Pro),
        ] {
            repo.create(email, "D", "secret1", plan).await.unwrap().unwrap();
        }

        let emails: Vec<_> = repo.list().await.into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["d1@example.com", "d2@example.com"]);
    }
}
