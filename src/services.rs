pub mod admin_service;
pub mod auth;
pub mod complaint_api;
pub mod credentials;
pub mod lifecycle;
pub mod officer_service;

pub use lifecycle::{ComplaintLifecycle, ComplaintStore};
