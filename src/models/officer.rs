// src/models/officer.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// Tipos de oficial (diferente da lista de departamentos das reclamações)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OfficerDepartment {
    Roads,
    Water,
    Electricity,
    Waste,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    pub id: String,
    pub email: String,
    pub department: OfficerDepartment,
    // A senha NÃO fica aqui: vai direto para o CredentialStore
}

// Dados que o gerenciador valida antes de gravar um oficial
#[derive(Debug, Validate)]
pub struct OfficerDetails {
    #[validate(length(min = 1, message = "O e-mail do oficial é obrigatório."))]
    pub email: String,
    pub department: OfficerDepartment,
}
