pub mod admin;
pub mod officer;
