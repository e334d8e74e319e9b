// src/config.rs

use anyhow::Context;
use std::{env, sync::Arc, time::Duration};

use crate::services::{
    admin_service::AdminService,
    auth::AuthService,
    complaint_api::{ComplaintBackend, HttpComplaintBackend},
    credentials::{BcryptCredentialStore, CredentialStore},
    lifecycle::{ComplaintLifecycle, ComplaintStore},
    officer_service::OfficerService,
};

// Configuração lida do ambiente (.env é carregado antes)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub complaints_api_url: String,
    pub backend_timeout: Duration,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let complaints_api_url =
            env::var("COMPLAINTS_API_URL").context("COMPLAINTS_API_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

        let backend_timeout_secs: u64 = match env::var("BACKEND_TIMEOUT_SECS") {
            Ok(v) => v.parse().context("BACKEND_TIMEOUT_SECS deve ser um número inteiro")?,
            Err(_) => 10,
        };
        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            jwt_secret,
            complaints_api_url,
            backend_timeout: Duration::from_secs(backend_timeout_secs),
            seed_demo_data,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub complaints: ComplaintStore,
    pub auth_service: AuthService,
    pub admin_service: AdminService,
    pub officer_service: OfficerService,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let backend = HttpComplaintBackend::new(&config.complaints_api_url, config.backend_timeout)
            .context("Falha ao criar o cliente da API de reclamações")?;
        tracing::info!("✅ Cliente da API de reclamações apontando para {}", config.complaints_api_url);

        let mut lifecycle = ComplaintLifecycle::new();
        if config.seed_demo_data {
            let count = lifecycle.ingest_complaints(crate::seed::demo_complaints());
            tracing::info!("🌱 {} reclamações de demonstração carregadas", count);
        }

        Ok(Self::with_parts(
            lifecycle,
            config.jwt_secret.clone(),
            Arc::new(backend),
            Arc::new(BcryptCredentialStore::default()),
        ))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_parts(
        lifecycle: ComplaintLifecycle,
        jwt_secret: String,
        backend: Arc<dyn ComplaintBackend>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let complaints = ComplaintStore::new(lifecycle);
        Self {
            auth_service: AuthService::new(jwt_secret),
            admin_service: AdminService::new(complaints.clone(), credentials),
            officer_service: OfficerService::new(complaints.clone(), backend),
            complaints,
        }
    }
}
