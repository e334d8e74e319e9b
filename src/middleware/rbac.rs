// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::Identity};

/// 1. O Trait que define um Papel exigido
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai a identidade (colocada pelo auth_guard)
        let identity = parts
            .extensions
            .get::<Identity>()
            .ok_or(AppError::InvalidToken)?;

        // B. Compara o papel. Qualquer outro texto de papel passa adiante sem validação.
        if identity.role != T::role() {
            return Err(AppError::Forbidden(T::role()));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct AdminRole;
impl RoleDef for AdminRole {
    fn role() -> &'static str { "admin" }
}
