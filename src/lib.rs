// src/lib.rs

pub mod common;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod seed;
pub mod services;
