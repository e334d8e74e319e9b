// src/services/lifecycle.rs

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    models::{
        complaint::{
            Complaint, ComplaintFilter, ComplaintStatus, ComplaintSummary, Department,
            DepartmentCount, OfficerAssignment,
        },
        officer::{Officer, OfficerDepartment, OfficerDetails},
    },
};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Dono do conjunto de reclamações e oficiais da sessão.
///
/// Toda mutação passa pelos métodos abaixo; nenhum campo é público. Os vetores
/// preservam a ordem de chegada, que é o desempate da ordenação por urgência.
#[derive(Debug, Default)]
pub struct ComplaintLifecycle {
    complaints: Vec<Complaint>,
    officers: Vec<Officer>,
}

impl ComplaintLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    // --- LEITURA ---

    /// Lista filtrada e ordenada por urgência. Sempre devolve uma cópia nova.
    pub fn list_complaints(&self, filter: &ComplaintFilter, descending: bool) -> Vec<Complaint> {
        let mut list: Vec<Complaint> = self
            .complaints
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        // `sort_by_key` é estável: empates mantêm a ordem de chegada
        if descending {
            list.sort_by_key(|c| std::cmp::Reverse(c.urgency_score));
        } else {
            list.sort_by_key(|c| c.urgency_score);
        }
        list
    }

    /// Painel do oficial: só as reclamações atribuídas a ele, mais urgentes primeiro.
    pub fn complaints_assigned_to(&self, officer_id: &str, search_text: Option<&str>) -> Vec<Complaint> {
        let filter = ComplaintFilter {
            department: None,
            search_text: search_text.map(str::to_owned),
        };
        self.list_complaints(&filter, true)
            .into_iter()
            .filter(|c| c.assigned_officer_id() == Some(officer_id))
            .collect()
    }

    pub fn get_complaint(&self, complaint_id: &str) -> Result<Complaint, AppError> {
        self.find_complaint(complaint_id)
            .cloned()
            .ok_or_else(|| AppError::complaint_not_found(complaint_id))
    }

    pub fn get_officer(&self, officer_id: &str) -> Result<Officer, AppError> {
        self.find_officer(officer_id)
            .cloned()
            .ok_or_else(|| AppError::officer_not_found(officer_id))
    }

    pub fn list_officers(&self) -> Vec<Officer> {
        self.officers.clone()
    }

    // --- RECLAMAÇÕES ---

    /// Entrada de reclamações criadas fora daqui (envio do cidadão, sync com a API).
    /// Ids conhecidos são substituídos no mesmo lugar; os novos vão para o fim.
    /// Se o oficial é o mesmo e o registro novo não traz e-mail, o e-mail local fica.
    pub fn ingest_complaints(&mut self, incoming: impl IntoIterator<Item = Complaint>) -> usize {
        let mut count = 0;
        for mut complaint in incoming {
            match self.complaints.iter_mut().find(|c| c.id == complaint.id) {
                Some(existing) => {
                    if let (Some(new), Some(old)) = (complaint.assignment.as_mut(), existing.assignment.take()) {
                        if new.assigned_officer_id == old.assigned_officer_id && new.assigned_officer_email.is_none() {
                            new.assigned_officer_email = old.assigned_officer_email;
                        }
                    }
                    *existing = complaint;
                }
                None => self.complaints.push(complaint),
            }
            count += 1;
        }
        count
    }

    /// Atribui um oficial e calcula a data estimada de conclusão.
    ///
    /// Um `estimated_days` não finito ou <= 0 não bloqueia a atribuição: o valor
    /// é guardado como veio e a data estimada fica ausente.
    pub fn assign_officer(
        &mut self,
        complaint_id: &str,
        officer_id: &str,
        estimated_days: f64,
    ) -> Result<Complaint, AppError> {
        self.assign_officer_at(complaint_id, officer_id, estimated_days, Utc::now())
    }

    pub(crate) fn assign_officer_at(
        &mut self,
        complaint_id: &str,
        officer_id: &str,
        estimated_days: f64,
        now: DateTime<Utc>,
    ) -> Result<Complaint, AppError> {
        // Valida as duas referências antes de mexer em qualquer coisa
        let officer_email = self
            .find_officer(officer_id)
            .map(|o| o.email.clone())
            .ok_or_else(|| AppError::officer_not_found(officer_id))?;
        let complaint = self
            .find_complaint_mut(complaint_id)
            .ok_or_else(|| AppError::complaint_not_found(complaint_id))?;

        complaint.assignment = Some(OfficerAssignment {
            assigned_officer_id: officer_id.to_string(),
            assigned_officer_email: Some(officer_email),
        });
        complaint.estimated_days = Some(estimated_days);
        complaint.estimated_completion_date = estimated_completion(now, estimated_days);

        tracing::info!(
            "📌 Reclamação {} atribuída ao oficial {} ({:?} dias)",
            complaint_id, officer_id, estimated_days
        );
        Ok(complaint.clone())
    }

    /// Avança um passo no ciclo. Em `Resolved` é um no-op.
    pub fn advance_status(&mut self, complaint_id: &str) -> Result<Complaint, AppError> {
        let complaint = self
            .find_complaint_mut(complaint_id)
            .ok_or_else(|| AppError::complaint_not_found(complaint_id))?;

        let previous = complaint.status;
        complaint.status = previous.next();
        if previous != complaint.status {
            tracing::info!("🔁 Reclamação {}: {:?} -> {:?}", complaint_id, previous, complaint.status);
        }
        Ok(complaint.clone())
    }

    /// Avança só se o status ainda for `expected`. Usado depois de uma chamada
    /// remota, quando outro pedido pode ter avançado a reclamação nesse meio tempo.
    pub fn advance_status_from(
        &mut self,
        complaint_id: &str,
        expected: ComplaintStatus,
    ) -> Result<Complaint, AppError> {
        let current = self
            .find_complaint(complaint_id)
            .map(|c| c.status)
            .ok_or_else(|| AppError::complaint_not_found(complaint_id))?;

        if current != expected {
            return Err(AppError::Precondition(format!(
                "O status da reclamação mudou para {:?} durante a atualização.",
                current
            )));
        }
        self.advance_status(complaint_id)
    }

    /// Remove de vez. Só reclamações resolvidas podem ser apagadas.
    pub fn delete_complaint(&mut self, complaint_id: &str) -> Result<(), AppError> {
        let index = self
            .complaints
            .iter()
            .position(|c| c.id == complaint_id)
            .ok_or_else(|| AppError::complaint_not_found(complaint_id))?;

        if self.complaints[index].status != ComplaintStatus::Resolved {
            return Err(AppError::Precondition(
                "Apenas reclamações resolvidas podem ser apagadas.".into(),
            ));
        }

        self.complaints.remove(index);
        tracing::info!("🗑️ Reclamação {} apagada", complaint_id);
        Ok(())
    }

    // --- OFICIAIS ---

    /// Cria o registro do oficial. A senha é tratada pelo `CredentialStore`.
    pub fn create_officer(
        &mut self,
        email: &str,
        department: OfficerDepartment,
    ) -> Result<Officer, AppError> {
        OfficerDetails { email: email.to_string(), department }.validate()?;

        let officer = Officer {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            department,
        };
        self.officers.push(officer.clone());

        tracing::info!("👮 Oficial {} criado ({:?})", officer.id, department);
        Ok(officer)
    }

    /// Sobrescreve e-mail e departamento. Não altera o e-mail já copiado nas reclamações.
    pub fn edit_officer(
        &mut self,
        officer_id: &str,
        new_email: &str,
        new_department: OfficerDepartment,
    ) -> Result<Officer, AppError> {
        let officer = self
            .officers
            .iter_mut()
            .find(|o| o.id == officer_id)
            .ok_or_else(|| AppError::officer_not_found(officer_id))?;

        OfficerDetails { email: new_email.to_string(), department: new_department }.validate()?;

        officer.email = new_email.to_string();
        officer.department = new_department;
        Ok(officer.clone())
    }

    /// Remove o oficial e desfaz a atribuição em todas as reclamações dele.
    /// As estimativas continuam: descrevem a reclamação, não o oficial.
    pub fn delete_officer(&mut self, officer_id: &str) -> Result<(), AppError> {
        let index = self
            .officers
            .iter()
            .position(|o| o.id == officer_id)
            .ok_or_else(|| AppError::officer_not_found(officer_id))?;

        self.officers.remove(index);

        let mut unassigned = 0;
        for complaint in self
            .complaints
            .iter_mut()
            .filter(|c| c.assigned_officer_id() == Some(officer_id))
        {
            complaint.assignment = None;
            unassigned += 1;
        }

        tracing::info!("🗑️ Oficial {} removido ({} reclamações sem responsável)", officer_id, unassigned);
        Ok(())
    }

    // --- HELPERS ---

    fn find_complaint(&self, id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id == id)
    }

    fn find_complaint_mut(&mut self, id: &str) -> Option<&mut Complaint> {
        self.complaints.iter_mut().find(|c| c.id == id)
    }

    fn find_officer(&self, id: &str) -> Option<&Officer> {
        self.officers.iter().find(|o| o.id == id)
    }
}

// Data estimada = agora + N dias (aceita fração de dia).
// Ausente se N não for um número finito positivo ou se a soma estourar.
pub(crate) fn estimated_completion(now: DateTime<Utc>, days: f64) -> Option<DateTime<Utc>> {
    if !days.is_finite() || days <= 0.0 {
        return None;
    }
    let millis = (days * MILLIS_PER_DAY).round();
    if millis > i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64).and_then(|delta| now.checked_add_signed(delta))
}

/// Cards do painel sobre uma lista já filtrada.
pub fn summarize(complaints: &[Complaint]) -> ComplaintSummary {
    let total = complaints.len();
    let count_status = |s: ComplaintStatus| complaints.iter().filter(|c| c.status == s).count();

    let avg_urgency = if total == 0 {
        0
    } else {
        let sum: u32 = complaints.iter().map(|c| u32::from(c.urgency_score)).sum();
        (f64::from(sum) / total as f64).round() as u32
    };

    let by_department = Department::ALL
        .into_iter()
        .map(|department| DepartmentCount {
            department,
            count: complaints.iter().filter(|c| c.department == department).count(),
        })
        .collect();

    ComplaintSummary {
        total,
        open: count_status(ComplaintStatus::Open),
        in_progress: count_status(ComplaintStatus::InProgress),
        resolved: count_status(ComplaintStatus::Resolved),
        avg_urgency,
        by_department,
    }
}

// ---
// ComplaintStore: o handle compartilhado entre os handlers
// ---

/// Um único escritor por vez; a cascata de `delete_officer` acontece inteira
/// dentro de um lock de escrita, então nenhum leitor vê o meio do caminho.
#[derive(Clone, Default)]
pub struct ComplaintStore {
    inner: Arc<RwLock<ComplaintLifecycle>>,
}

impl ComplaintStore {
    pub fn new(lifecycle: ComplaintLifecycle) -> Self {
        Self { inner: Arc::new(RwLock::new(lifecycle)) }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, ComplaintLifecycle> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, ComplaintLifecycle> {
        self.inner.write().await
    }
}
