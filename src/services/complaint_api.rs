// src/services/complaint_api.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::{
    models::complaint::{Complaint, ComplaintStatus, Department, OfficerAssignment},
    services::lifecycle::estimated_completion,
};

// Canal de erro da rede, separado da taxonomia local
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status HTTP inesperado {status}: {body}")]
    Status { status: u16, body: String },
}

// ---
// Formato dos registros na API externa
// ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

impl UrgencyLevel {
    // Notas fixas por faixa (não é uma escala contínua)
    pub fn score(self) -> u8 {
        match self {
            UrgencyLevel::High => 90,
            UrgencyLevel::Medium => 70,
            UrgencyLevel::Low => 40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendComplaint {
    #[serde(rename = "_id")]
    pub id: String,
    pub category: String,
    pub user_id: String,
    pub urgency: UrgencyLevel,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_time: Option<f64>,
    #[serde(default, rename = "assigned_officer_id")]
    pub assigned_officer_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<BackendComplaint> for Complaint {
    type Error = String;

    fn try_from(record: BackendComplaint) -> Result<Self, Self::Error> {
        let department: Department = record.category.parse()?;

        let mut complaint = Complaint::new(
            record.id,
            record.category,
            record.user_id,
            department,
            record.urgency.score(),
            record.created_at,
        );
        complaint.status = record.status;
        complaint.estimated_days = record.estimated_time;
        complaint.description = record.description;
        // A API não devolve o e-mail do oficial
        complaint.assignment = record.assigned_officer_id.map(|id| OfficerAssignment {
            assigned_officer_id: id,
            assigned_officer_email: None,
        });
        // Sem data de atribuição na API: a estimativa conta a partir da criação
        if complaint.assignment.is_some() {
            complaint.estimated_completion_date = record
                .estimated_time
                .and_then(|days| estimated_completion(complaint.created_at, days));
        }
        Ok(complaint)
    }
}

/// Converte um elemento cru da lista da API. Erros de formato e de categoria
/// voltam como texto para o chamador decidir (o sync pula e avisa).
pub fn map_record(value: serde_json::Value) -> Result<Complaint, String> {
    let record: BackendComplaint = serde_json::from_value(value).map_err(|e| e.to_string())?;
    Complaint::try_from(record)
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: ComplaintStatus,
}

// ---
// O contrato da API externa
// ---

#[async_trait]
pub trait ComplaintBackend: Send + Sync {
    /// GET /complaints/officer?id={officer_id}
    ///
    /// Devolve os elementos crus: um registro malformado não pode derrubar a lista inteira.
    async fn fetch_officer_complaints(&self, officer_id: &str) -> Result<Vec<serde_json::Value>, BackendError>;

    /// PATCH /complaints/{id}/status
    async fn update_status(&self, complaint_id: &str, status: ComplaintStatus) -> Result<(), BackendError>;

    /// GET /complaints/{id}
    async fn fetch_complaint(&self, complaint_id: &str) -> Result<serde_json::Value, BackendError>;
}

#[derive(Clone)]
pub struct HttpComplaintBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpComplaintBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }
        Ok(response)
    }
}

#[async_trait]
impl ComplaintBackend for HttpComplaintBackend {
    async fn fetch_officer_complaints(&self, officer_id: &str) -> Result<Vec<serde_json::Value>, BackendError> {
        let response = self
            .client
            .get(self.url("/complaints/officer"))
            .query(&[("id", officer_id)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_status(&self, complaint_id: &str, status: ComplaintStatus) -> Result<(), BackendError> {
        let response = self
            .client
            .patch(self.url(&format!("/complaints/{}/status", complaint_id)))
            .json(&StatusUpdate { status })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_complaint(&self, complaint_id: &str) -> Result<serde_json::Value, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("/complaints/{}", complaint_id)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
