// src/services/officer_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::complaint::Complaint,
    services::{
        complaint_api::{map_record, ComplaintBackend},
        lifecycle::ComplaintStore,
    },
};

/// Fluxos do painel do oficial que passam pela API externa.
///
/// As chamadas de rede acontecem fora do lock; o estado local só muda depois
/// de uma resposta de sucesso.
#[derive(Clone)]
pub struct OfficerService {
    store: ComplaintStore,
    backend: Arc<dyn ComplaintBackend>,
}

impl OfficerService {
    pub fn new(store: ComplaintStore, backend: Arc<dyn ComplaintBackend>) -> Self {
        Self { store, backend }
    }

    /// Busca as reclamações atribuídas ao oficial e incorpora no conjunto local.
    /// Registros que não dá para mapear são pulados com um aviso.
    pub async fn sync_assigned(&self, officer_id: &str) -> Result<Vec<Complaint>, AppError> {
        let records = self.backend.fetch_officer_complaints(officer_id).await?;
        let received = records.len();

        let complaints: Vec<Complaint> = records
            .into_iter()
            .filter_map(|value| {
                let id = value.get("_id").cloned().unwrap_or_default();
                map_record(value)
                    .map_err(|e| tracing::warn!("⚠️ Registro {} ignorado: {}", id, e))
                    .ok()
            })
            .collect();

        let mut lifecycle = self.store.write().await;
        let ingested = lifecycle.ingest_complaints(complaints);
        tracing::info!(
            "🔄 Sync do oficial {}: {} recebidas, {} incorporadas",
            officer_id, received, ingested
        );
        Ok(lifecycle.complaints_assigned_to(officer_id, None))
    }

    /// Avança o status na API e, só depois do sucesso, localmente.
    /// Reclamações já resolvidas não geram chamada de rede. Se outro pedido
    /// avançou a reclamação durante a chamada, devolve `Precondition` e o
    /// estado local fica igual ao que a API recebeu.
    pub async fn advance_remote(&self, complaint_id: &str) -> Result<Complaint, AppError> {
        let current = self.store.read().await.get_complaint(complaint_id)?;
        if current.status.is_terminal() {
            return Ok(current);
        }

        let target = current.status.next();
        if let Err(e) = self.backend.update_status(complaint_id, target).await {
            tracing::error!("🔥 Falha ao atualizar status de {}: {}", complaint_id, e);
            return Err(e.into());
        }

        self.store
            .write()
            .await
            .advance_status_from(complaint_id, current.status)
    }

    /// Abre o detalhe. A busca na API é só para log; falha não bloqueia a visualização.
    pub async fn view(&self, complaint_id: &str) -> Result<Complaint, AppError> {
        let complaint = self.store.read().await.get_complaint(complaint_id)?;

        match self.backend.fetch_complaint(complaint_id).await {
            Ok(detail) => tracing::debug!("📄 Detalhe de {}: {}", complaint_id, detail),
            Err(e) => tracing::warn!("⚠️ Detalhe de {} indisponível: {}", complaint_id, e),
        }
        Ok(complaint)
    }
}
