// src/seed.rs

use chrono::{DateTime, Utc};

use crate::models::complaint::{Complaint, ComplaintStatus, Department};

// Reclamações de demonstração para o painel do admin (SEED_DEMO_DATA=true)
pub fn demo_complaints() -> Vec<Complaint> {
    let rows = [
        ("CMP-0001", "Overflowing trash bins on Churchill Ave", "M. Bekele", Department::Sanitation, 88, ComplaintStatus::Open, "2025-09-02T09:30:00Z"),
        ("CMP-0002", "Potholes causing traffic near Mexico Square", "S. Alem", Department::Roads, 72, ComplaintStatus::InProgress, "2025-09-03T12:10:00Z"),
        ("CMP-0003", "Water outage in Bole 22", "H. Dawit", Department::Water, 91, ComplaintStatus::Open, "2025-09-01T06:15:00Z"),
        ("CMP-0004", "Streetlights not working around Meskel Square", "Y. Nuru", Department::Electricity, 64, ComplaintStatus::Resolved, "2025-08-29T18:45:00Z"),
        ("CMP-0005", "Damaged benches in Sheger Park", "A. Fekadu", Department::Parks, 55, ComplaintStatus::Open, "2025-09-04T08:05:00Z"),
    ];

    rows.into_iter()
        .map(|(id, subject, citizen, dept, urgency, status, created)| {
            let created_at = DateTime::parse_from_rfc3339(created)
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now());
            let mut complaint = Complaint::new(id, subject, citizen, dept, urgency, created_at);
            complaint.status = status;
            complaint
        })
        .collect()
}
