// src/services/credentials.rs

use async_trait::async_trait;
use bcrypt::{hash, verify};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::error::AppError;

/// Para onde vai a senha de um oficial. O registro do oficial nunca guarda a senha.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn register(&self, officer_id: &str, email: &str, secret: &str) -> Result<(), AppError>;

    async fn revoke(&self, officer_id: &str) -> Result<(), AppError>;
}

// Uma entrada por oficial: e-mail + hash bcrypt
#[derive(Debug, Clone)]
struct StoredCredential {
    email: String,
    password_hash: String,
}

/// Implementação em processo: guarda só o hash bcrypt.
#[derive(Clone)]
pub struct BcryptCredentialStore {
    cost: u32,
    entries: Arc<RwLock<HashMap<String, StoredCredential>>>,
}

impl BcryptCredentialStore {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Confere uma senha contra o hash guardado (false se o oficial não existe).
    pub async fn verify(&self, officer_id: &str, secret: &str) -> Result<bool, AppError> {
        let Some(stored) = self.entries.read().await.get(officer_id).cloned() else {
            return Ok(false);
        };

        let secret_clone = secret.to_owned();
        // Executa a verificação em um thread separado
        let is_valid = tokio::task::spawn_blocking(move || verify(&secret_clone, &stored.password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(is_valid)
    }

    pub async fn email_of(&self, officer_id: &str) -> Option<String> {
        self.entries.read().await.get(officer_id).map(|c| c.email.clone())
    }
}

impl Default for BcryptCredentialStore {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl CredentialStore for BcryptCredentialStore {
    async fn register(&self, officer_id: &str, email: &str, secret: &str) -> Result<(), AppError> {
        // Hashing fora do runtime assíncrono
        let secret_clone = secret.to_owned();
        let cost = self.cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&secret_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.entries.write().await.insert(
            officer_id.to_string(),
            StoredCredential { email: email.to_string(), password_hash },
        );
        tracing::info!("🔐 Credenciais registradas para o oficial {}", officer_id);
        Ok(())
    }

    async fn revoke(&self, officer_id: &str) -> Result<(), AppError> {
        if self.entries.write().await.remove(officer_id).is_some() {
            tracing::info!("🔐 Credenciais revogadas para o oficial {}", officer_id);
        }
        Ok(())
    }
}
