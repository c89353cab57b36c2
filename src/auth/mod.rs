//! Accounts and session tokens
//!
//! Credentials are PBKDF2-hashed with a per-user salt. Sessions are
//! HS256 JWTs signed with the configured secret; no third-party identity
//! provider is involved.

use crate::error::{LockboxError, Result};
use crate::store::StateStore;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const PBKDF2_ROUNDS: u32 = 100_000;
const SALT_LEN: usize = 16;

/// Stored account record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of an account, safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// PBKDF2-SHA256 a password under a fresh random salt.
/// Returns (hash, salt), both hex encoded.
pub fn hash_password(password: &str) -> (String, String) {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hash = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ROUNDS, &mut hash);

    (hex::encode(hash), hex::encode(salt))
}

pub fn verify_password(password: &str, salt_hex: &str, hash_hex: &str) -> bool {
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };

    let mut hash = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ROUNDS, &mut hash);
    hash.as_slice() == expected.as_slice()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
}

fn signer(secret: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| LockboxError::Internal(format!("HMAC init failed: {e}")))
}

/// Mint an HS256 session token for a user
pub fn issue_token(secret: &str, user: &User, ttl_hours: i64) -> Result<String> {
    let claims = TokenClaims {
        sub: user.id,
        email: user.email.clone(),
        exp: (Utc::now() + chrono::Duration::hours(ttl_hours)).timestamp(),
    };

    let header = BASE64URL.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = BASE64URL.encode(serde_json::to_vec(&claims)?);
    let message = format!("{header}.{payload}");

    let mut mac = signer(secret)?;
    mac.update(message.as_bytes());
    let signature = BASE64URL.encode(mac.finalize().into_bytes());

    Ok(format!("{message}.{signature}"))
}

/// Check a token's signature and expiry, returning its claims
pub fn verify_token(secret: &str, token: &str) -> Result<TokenClaims> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(LockboxError::Auth("malformed token".to_string()));
    };

    let signature = BASE64URL
        .decode(signature)
        .map_err(|_| LockboxError::Auth("malformed token".to_string()))?;

    let mut mac = signer(secret)?;
    mac.update(format!("{header}.{payload}").as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| LockboxError::Auth("invalid token signature".to_string()))?;

    let payload = BASE64URL
        .decode(payload)
        .map_err(|_| LockboxError::Auth("malformed token".to_string()))?;
    let claims: TokenClaims = serde_json::from_slice(&payload)
        .map_err(|_| LockboxError::Auth("malformed token".to_string()))?;

    if claims.exp < Utc::now().timestamp() {
        return Err(LockboxError::Auth("token expired".to_string()));
    }

    Ok(claims)
}

/// Signup, login, and token verification against the shared store
pub struct AuthService {
    store: Arc<dyn StateStore>,
    write_lock: Arc<Mutex<()>>,
    token_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn StateStore>,
        write_lock: Arc<Mutex<()>>,
        token_secret: String,
        token_ttl_hours: i64,
    ) -> Self {
        Self {
            store,
            write_lock,
            token_secret,
            token_ttl_hours,
        }
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<(String, UserProfile)> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(LockboxError::Validation(
                "invalid email address".to_string(),
            ));
        }
        if password.len() < 6 {
            return Err(LockboxError::Validation(
                "password must be at least 6 characters".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut users = self.store.load_users().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(LockboxError::Validation(
                "email already registered".to_string(),
            ));
        }

        let (password_hash, salt) = hash_password(password);
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            salt,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.store.save_users(&users).await?;

        let token = issue_token(&self.token_secret, &user, self.token_ttl_hours)?;
        Ok((token, user.profile()))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile)> {
        let email = email.trim().to_lowercase();
        let users = self.store.load_users().await?;

        // same error whether the account is unknown or the password is wrong
        let user = users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| verify_password(password, &u.salt, &u.password_hash))
            .ok_or_else(|| LockboxError::Auth("invalid email or password".to_string()))?;

        let token = issue_token(&self.token_secret, user, self.token_ttl_hours)?;
        Ok((token, user.profile()))
    }

    /// Resolve a bearer token to the profile of a still-registered user
    pub async fn verify(&self, token: &str) -> Result<UserProfile> {
        let claims = verify_token(&self.token_secret, token)?;
        let users = self.store.load_users().await?;
        users
            .iter()
            .find(|u| u.id == claims.sub)
            .map(User::profile)
            .ok_or_else(|| LockboxError::Auth("unknown user".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_user() -> User {
        let (password_hash, salt) = hash_password("hunter22");
        User {
            id: Uuid::new_v4(),
            email: "fan@example.com".to_string(),
            password_hash,
            salt,
            created_at: Utc::now(),
        }
    }

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(Mutex::new(())),
            "test-secret".to_string(),
            72,
        )
    }

    #[test]
    fn password_hash_round_trip() {
        let (hash, salt) = hash_password("hunter22");
        assert!(verify_password("hunter22", &salt, &hash));
        assert!(!verify_password("hunter23", &salt, &hash));
    }

    #[test]
    fn salts_differ_between_calls() {
        let (hash_a, salt_a) = hash_password("hunter22");
        let (hash_b, salt_b) = hash_password("hunter22");
        assert_ne!(salt_a, salt_b);
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn token_round_trip_and_tampering() {
        let user = test_user();
        let token = issue_token("test-secret", &user, 72).unwrap();

        let claims = verify_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);

        assert!(verify_token("other-secret", &token).is_err());
        assert!(verify_token("test-secret", &format!("{token}x")).is_err());
        assert!(verify_token("test-secret", "garbage").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = test_user();
        let token = issue_token("test-secret", &user, -1).unwrap();
        let err = verify_token("test-secret", &token).unwrap_err();
        assert!(matches!(err, LockboxError::Auth(msg) if msg.contains("expired")));
    }

    #[tokio::test]
    async fn signup_login_verify_flow() {
        let auth = service();

        let (token, profile) = auth.signup("Fan@Example.com ", "hunter22").await.unwrap();
        assert_eq!(profile.email, "fan@example.com");

        let verified = auth.verify(&token).await.unwrap();
        assert_eq!(verified.id, profile.id);

        let (_, again) = auth.login("fan@example.com", "hunter22").await.unwrap();
        assert_eq!(again.id, profile.id);

        let err = auth.login("fan@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, LockboxError::Auth(_)));
    }

    #[tokio::test]
    async fn duplicate_and_invalid_signups_are_rejected() {
        let auth = service();
        auth.signup("fan@example.com", "hunter22").await.unwrap();

        let err = auth.signup("fan@example.com", "hunter22").await.unwrap_err();
        assert!(matches!(err, LockboxError::Validation(msg) if msg.contains("registered")));

        let err = auth.signup("not-an-email", "hunter22").await.unwrap_err();
        assert!(matches!(err, LockboxError::Validation(_)));

        let err = auth.signup("new@example.com", "short").await.unwrap_err();
        assert!(matches!(err, LockboxError::Validation(msg) if msg.contains("password")));
    }
}
