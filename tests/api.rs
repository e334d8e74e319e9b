//! Testes HTTP do backend de reclamações: papéis, atribuição, exclusão e os
//! fluxos do oficial contra uma API externa falsa, tudo em processo.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use complaints_backend::{
    config::AppState,
    models::{auth::Claims, complaint::ComplaintStatus},
    router::build_router,
    seed::demo_complaints,
    services::{
        complaint_api::{BackendComplaint, BackendError, ComplaintBackend, UrgencyLevel},
        credentials::BcryptCredentialStore,
        ComplaintLifecycle,
    },
};

const TEST_JWT_SECRET: &str = "segredo-dos-testes";

// ── API externa falsa ──────────────────────────────────────────

#[derive(Default)]
struct FakeBackend {
    patches: Mutex<Vec<(String, ComplaintStatus)>>,
}

#[async_trait]
impl ComplaintBackend for FakeBackend {
    async fn fetch_officer_complaints(&self, officer_id: &str) -> Result<Vec<Value>, BackendError> {
        let valid = BackendComplaint {
            id: "api-1".into(),
            category: "Electricity".into(),
            user_id: "citizen-9".into(),
            urgency: UrgencyLevel::High,
            status: ComplaintStatus::Open,
            created_at: Utc::now(),
            estimated_time: Some(3.0),
            assigned_officer_id: Some(officer_id.to_string()),
            description: Some("Transformer outage near Piassa".into()),
        };
        Ok(vec![
            json!({
                "_id": "api-bad",
                "category": "Water",
                "userId": "citizen-3",
                "urgency": "critical",
                "status": "open",
                "createdAt": "2025-09-01T06:15:00Z",
                "assigned_officer_id": officer_id
            }),
            serde_json::to_value(valid).expect("failed to encode backend record"),
        ])
    }

    async fn update_status(&self, complaint_id: &str, status: ComplaintStatus) -> Result<(), BackendError> {
        self.patches.lock().unwrap().push((complaint_id.to_string(), status));
        Ok(())
    }

    async fn fetch_complaint(&self, complaint_id: &str) -> Result<Value, BackendError> {
        Ok(json!({ "_id": complaint_id }))
    }
}

// ── Helpers ────────────────────────────────────────────────────

fn make_jwt(sub: &str, role: &str) -> String {
    let claims = Claims {
        sub: sub.into(),
        role: role.into(),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_JWT_SECRET.as_ref()))
        .expect("failed to encode test JWT")
}

fn admin_jwt() -> String {
    make_jwt("admin-1", "admin")
}

fn build_test_app() -> (axum::Router, Arc<FakeBackend>) {
    let mut lifecycle = ComplaintLifecycle::new();
    lifecycle.ingest_complaints(demo_complaints());

    let backend = Arc::new(FakeBackend::default());
    let state = AppState::with_parts(
        lifecycle,
        TEST_JWT_SECRET.into(),
        backend.clone(),
        Arc::new(BcryptCredentialStore::new(4)),
    );
    (build_router(state), backend)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

// ── Testes ─────────────────────────────────────────────────────

#[tokio::test]
async fn health_needs_no_auth() {
    let (app, _) = build_test_app();
    let resp = app.oneshot(request("GET", "/api/health", None, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let (app, _) = build_test_app();
    let (status, _) = send(&app, request("GET", "/api/admin/complaints", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, request("GET", "/api/admin/complaints", Some("not-a-jwt"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn officers_cannot_use_admin_routes() {
    let (app, _) = build_test_app();
    let token = make_jwt("officer-1", "Electricity-Officer");
    let (status, _) = send(&app, request("GET", "/api/admin/complaints", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_list_filters_and_sorts_by_urgency() {
    let (app, _) = build_test_app();
    let token = admin_jwt();

    let (status, body) = send(&app, request("GET", "/api/admin/complaints", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["CMP-0003", "CMP-0001", "CMP-0002", "CMP-0004", "CMP-0005"]);
    assert_eq!(body[0]["urgencyBand"], "high");

    let (_, body) = send(&app, request("GET", "/api/admin/complaints?department=All&order=asc", Some(&token), None)).await;
    assert_eq!(ids(&body), ["CMP-0005", "CMP-0004", "CMP-0002", "CMP-0001", "CMP-0003"]);

    let (_, body) = send(&app, request("GET", "/api/admin/complaints?department=Roads", Some(&token), None)).await;
    assert_eq!(ids(&body), ["CMP-0002"]);

    let (_, body) = send(&app, request("GET", "/api/admin/complaints?search=BEKELE", Some(&token), None)).await;
    assert_eq!(ids(&body), ["CMP-0001"]);

    let (status, _) = send(&app, request("GET", "/api/admin/complaints?department=Noise", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_officer_is_assigned_and_listed_with_email() {
    let (app, _) = build_test_app();
    let token = admin_jwt();

    let (status, officer) = send(
        &app,
        request(
            "POST",
            "/api/admin/officers",
            Some(&token),
            Some(json!({ "email": "a@city.gov", "department": "Roads", "password": "s3cret" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(officer.get("password").is_none());
    let officer_id = officer["id"].as_str().unwrap().to_string();

    let (status, assigned) = send(
        &app,
        request(
            "PUT",
            "/api/admin/complaints/CMP-0002/assignment",
            Some(&token),
            Some(json!({ "officerId": officer_id, "estimatedDays": 5 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned["assignedOfficerEmail"], "a@city.gov");
    assert!(assigned["estimatedCompletionDate"].is_string());
    assert_eq!(assigned["status"], "in_progress");

    let (_, list) = send(&app, request("GET", "/api/admin/complaints", Some(&token), None)).await;
    let item = list
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "CMP-0002")
        .unwrap();
    assert_eq!(item["assignedOfficerEmail"], "a@city.gov");
    assert_eq!(item["assignedOfficerId"], officer_id.as_str());
}

#[tokio::test]
async fn empty_officer_email_is_a_validation_error() {
    let (app, _) = build_test_app();
    let token = admin_jwt();
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/admin/officers",
            Some(&token),
            Some(json!({ "email": "", "department": "Water", "password": "pw" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());

    let (_, officers) = send(&app, request("GET", "/api/admin/officers", Some(&token), None)).await;
    assert!(officers.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_officer_unassigns_their_complaints() {
    let (app, _) = build_test_app();
    let token = admin_jwt();

    let (_, officer) = send(
        &app,
        request(
            "POST",
            "/api/admin/officers",
            Some(&token),
            Some(json!({ "email": "gone@city.gov", "department": "Waste", "password": "pw" })),
        ),
    )
    .await;
    let officer_id = officer["id"].as_str().unwrap().to_string();
    send(
        &app,
        request(
            "PUT",
            "/api/admin/complaints/CMP-0001/assignment",
            Some(&token),
            Some(json!({ "officerId": officer_id, "estimatedDays": 2 })),
        ),
    )
    .await;

    let (status, _) = send(&app, request("DELETE", &format!("/api/admin/officers/{officer_id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, request("GET", "/api/admin/complaints?search=CMP-0001", Some(&token), None)).await;
    assert_eq!(ids(&list), ["CMP-0001"]);
    assert!(list[0].get("assignedOfficerId").is_none());
    assert!(list[0].get("assignedOfficerEmail").is_none());

    let (status, _) = send(&app, request("DELETE", &format!("/api/admin/officers/{officer_id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_resolved_complaints_can_be_deleted() {
    let (app, _) = build_test_app();
    let token = admin_jwt();

    let (status, _) = send(&app, request("DELETE", "/api/admin/complaints/CMP-0001", Some(&token), None)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // CMP-0004 já está resolvida na massa de demonstração
    let (status, _) = send(&app, request("DELETE", "/api/admin/complaints/CMP-0004", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, request("GET", "/api/admin/complaints", Some(&token), None)).await;
    let remaining = ids(&list);
    assert!(remaining.contains(&"CMP-0001".to_string()));
    assert!(!remaining.contains(&"CMP-0004".to_string()));

    let (status, _) = send(&app, request("DELETE", "/api/admin/complaints/CMP-0004", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_summary_counts_visible_complaints() {
    let (app, _) = build_test_app();
    let token = admin_jwt();
    let (status, summary) = send(&app, request("GET", "/api/admin/complaints/summary", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 5);
    assert_eq!(summary["open"], 3);
    assert_eq!(summary["inProgress"], 1);
    assert_eq!(summary["resolved"], 1);
    // (88 + 72 + 91 + 64 + 55) / 5 = 74
    assert_eq!(summary["avgUrgency"], 74);
}

#[tokio::test]
async fn officer_syncs_advances_and_views_assigned_complaints() {
    let (app, backend) = build_test_app();
    let token = make_jwt("officer-1", "Electricity-Officer");

    let (status, synced) = send(&app, request("POST", "/api/officer/complaints/sync", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&synced), ["api-1"]);
    assert_eq!(synced[0]["urgencyScore"], 90);
    assert!(synced[0]["estimatedCompletionDate"].is_string());

    let (_, mine) = send(&app, request("GET", "/api/officer/complaints", Some(&token), None)).await;
    assert_eq!(ids(&mine), ["api-1"]);

    let (status, advanced) = send(&app, request("POST", "/api/officer/complaints/api-1/advance", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advanced["status"], "in_progress");
    assert_eq!(
        *backend.patches.lock().unwrap(),
        vec![("api-1".to_string(), ComplaintStatus::InProgress)]
    );

    let (status, viewed) = send(&app, request("GET", "/api/officer/complaints/api-1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(viewed["description"], "Transformer outage near Piassa");

    let (_, summary) = send(&app, request("GET", "/api/officer/complaints/summary", Some(&token), None)).await;
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["inProgress"], 1);

    let (status, _) = send(&app, request("GET", "/api/officer/complaints/missing", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
