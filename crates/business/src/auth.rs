//! Login orchestration
//!
//! Password hashing and token cryptography are external collaborators;
//! this module only wires them together: resolve the consumer by phone
//! number, verify the credential, issue a token pair. The collaborator
//! traits are deliberately tiny so production implementations (argon2,
//! JWT) and test fakes are interchangeable.

use kredit_core::{DomainError, DomainResult, Store};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Checks a plaintext password against an opaque stored hash.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

/// Issues access/refresh tokens for a verified subject.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &str) -> DomainResult<TokenPair>;
}

/// Access/refresh token pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthUsecase<S, V, T> {
    store: S,
    verifier: V,
    issuer: T,
}

impl<S, V, T> AuthUsecase<S, V, T>
where
    S: Store,
    V: PasswordVerifier,
    T: TokenIssuer,
{
    pub fn new(store: S, verifier: V, issuer: T) -> Self {
        Self {
            store,
            verifier,
            issuer,
        }
    }

    /// Authenticate by phone number and password.
    pub async fn login(&self, phone_number: &str, password: &str) -> DomainResult<TokenPair> {
        let consumer = self
            .store
            .find_consumer_by_phone(phone_number)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("consumer with phone {phone_number}")))?;

        if !self.verifier.verify(password, &consumer.password_hash) {
            return Err(DomainError::Unauthorized("invalid password".to_string()));
        }

        let tokens = self.issuer.issue(&consumer.phone_number)?;
        info!(nik = %consumer.nik, "consumer logged in");
        Ok(tokens)
    }
}
