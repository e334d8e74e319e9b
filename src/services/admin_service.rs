// src/services/admin_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::officer::{Officer, OfficerDepartment},
    services::{credentials::CredentialStore, lifecycle::ComplaintStore},
};

/// Gestão de oficiais pelo painel do admin: registro + credenciais.
#[derive(Clone)]
pub struct AdminService {
    store: ComplaintStore,
    credentials: Arc<dyn CredentialStore>,
}

impl AdminService {
    pub fn new(store: ComplaintStore, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { store, credentials }
    }

    pub async fn create_officer(
        &self,
        email: &str,
        department: OfficerDepartment,
        secret: &str,
    ) -> Result<Officer, AppError> {
        // Segura o lock durante o registro das credenciais:
        // ninguém vê um oficial sem credenciais.
        let mut lifecycle = self.store.write().await;
        let officer = lifecycle.create_officer(email, department)?;

        if let Err(e) = self.credentials.register(&officer.id, &officer.email, secret).await {
            tracing::error!("🔥 Falha ao registrar credenciais de {}: {}", officer.id, e);
            // Desfaz: o oficial acabou de nascer, não há reclamações apontando para ele
            lifecycle.delete_officer(&officer.id)?;
            return Err(e);
        }
        Ok(officer)
    }

    pub async fn edit_officer(
        &self,
        officer_id: &str,
        email: &str,
        department: OfficerDepartment,
    ) -> Result<Officer, AppError> {
        self.store.write().await.edit_officer(officer_id, email, department)
    }

    pub async fn delete_officer(&self, officer_id: &str) -> Result<(), AppError> {
        self.store.write().await.delete_officer(officer_id)?;

        // O registro já saiu; uma falha aqui só é logada
        if let Err(e) = self.credentials.revoke(officer_id).await {
            tracing::warn!("⚠️ Não foi possível revogar credenciais de {}: {}", officer_id, e);
        }
        Ok(())
    }
}
