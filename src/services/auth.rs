// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Identity},
};

// Só valida tokens: a emissão é do provedor de identidade externo
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<Identity, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(Identity::from(token_data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, role: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: "officer-1".into(),
            role: role.into(),
            exp: (Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }

    #[test]
    fn valid_token_yields_identity() {
        let service = AuthService::new("segredo".into());
        let identity = service.validate_token(&token("segredo", "Electricity-Officer", 3600)).unwrap();
        assert_eq!(identity.user_id, "officer-1");
        assert_eq!(identity.role, "Electricity-Officer");
    }

    #[test]
    fn wrong_secret_or_expired_token_is_rejected() {
        let service = AuthService::new("segredo".into());
        assert!(matches!(service.validate_token(&token("outro", "admin", 3600)), Err(AppError::InvalidToken)));
        assert!(matches!(service.validate_token(&token("segredo", "admin", -3600)), Err(AppError::InvalidToken)));
        assert!(matches!(service.validate_token("lixo"), Err(AppError::InvalidToken)));
    }
}
