// src/models/complaint.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- ENUMS ---

// Departamentos que recebem reclamações
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    Sanitation,
    Roads,
    Water,
    Electricity,
    Parks,
}

impl Department {
    // Ordem fixa usada nos cards de analytics
    pub const ALL: [Department; 5] = [
        Department::Sanitation,
        Department::Roads,
        Department::Water,
        Department::Electricity,
        Department::Parks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sanitation => "Sanitation",
            Department::Roads => "Roads",
            Department::Water => "Water",
            Department::Electricity => "Electricity",
            Department::Parks => "Parks",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    // Aceita qualquer capitalização ("water", "WATER", "Water")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Departamento desconhecido: '{}'", s))
    }
}

// Ciclo de vida: Open -> InProgress -> Resolved (sem volta)
// Vira "open", "in_progress", "resolved" no JSON (mesmo formato da API externa)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// Próximo estado do ciclo. `Resolved` é terminal e devolve ele mesmo.
    pub fn next(self) -> Self {
        match self {
            ComplaintStatus::Open => ComplaintStatus::InProgress,
            ComplaintStatus::InProgress => ComplaintStatus::Resolved,
            ComplaintStatus::Resolved => ComplaintStatus::Resolved,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ComplaintStatus::Resolved
    }
}

// Faixas de urgência exibidas no painel
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyBand {
    High,
    Medium,
    Low,
}

impl UrgencyBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => UrgencyBand::High,
            60..=79 => UrgencyBand::Medium,
            _ => UrgencyBand::Low,
        }
    }
}

// --- RECLAMAÇÃO ---

// O oficial responsável. Id e e-mail andam sempre juntos.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficerAssignment {
    pub assigned_officer_id: String,
    // Cópia do e-mail no momento da atribuição (pode ficar desatualizada)
    pub assigned_officer_email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub subject: String,
    pub citizen_name: String,
    pub department: Department,
    pub urgency_score: u8,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub assignment: Option<OfficerAssignment>,

    // Guardado como veio na atribuição, mesmo se inválido
    pub estimated_days: Option<f64>,
    pub estimated_completion_date: Option<DateTime<Utc>>,

    pub description: Option<String>,
}

impl Complaint {
    /// Reclamação recém-chegada: aberta e sem atribuição.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        citizen_name: impl Into<String>,
        department: Department,
        urgency_score: u8,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            citizen_name: citizen_name.into(),
            department,
            urgency_score: urgency_score.min(100),
            status: ComplaintStatus::Open,
            created_at,
            assignment: None,
            estimated_days: None,
            estimated_completion_date: None,
            description: None,
        }
    }

    pub fn assigned_officer_id(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.assigned_officer_id.as_str())
    }

    pub fn assigned_officer_email(&self) -> Option<&str> {
        self.assignment
            .as_ref()
            .and_then(|a| a.assigned_officer_email.as_deref())
    }

    pub fn urgency_band(&self) -> UrgencyBand {
        UrgencyBand::from_score(self.urgency_score)
    }

    // Busca case-insensitive por id, assunto ou nome do cidadão.
    // `needle` já deve vir em minúsculas.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.subject.to_lowercase().contains(needle)
            || self.citizen_name.to_lowercase().contains(needle)
    }
}

// Item de listagem: a reclamação + a faixa de urgência calculada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintListItem {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub urgency_band: UrgencyBand,
}

impl From<Complaint> for ComplaintListItem {
    fn from(complaint: Complaint) -> Self {
        let urgency_band = complaint.urgency_band();
        Self { complaint, urgency_band }
    }
}

// --- FILTROS ---

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    // None = todos os departamentos (o "All" da tela)
    pub department: Option<Department>,
    pub search_text: Option<String>,
}

impl ComplaintFilter {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if let Some(dept) = self.department {
            if complaint.department != dept {
                return false;
            }
        }
        match self.search_text.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => complaint.matches_search(&q.to_lowercase()),
            _ => true,
        }
    }
}

// --- ANALYTICS ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCount {
    pub department: Department,
    pub count: usize,
}

// Os cards do topo do painel
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub avg_urgency: u32,
    pub by_department: Vec<DepartmentCount>,
}
