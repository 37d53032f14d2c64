use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin username
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    admin_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, admin_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            admin_token_expires_in: admin_expires_in,
        }
    }

    pub fn generate_admin_token(&self, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.admin_token_expires_in);

        let claims = Claims {
            sub: username.to_string(),
            role: ADMIN_ROLE.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_admin_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.role != ADMIN_ROLE {
            return Err(AppError::AuthError("Token lacks admin role".to_string()));
        }

        Ok(claims)
    }

    pub fn get_admin_token_expires_in(&self) -> i64 {
        self.admin_token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_token_round_trip() {
        let service = JwtService::new("unit-test-secret", 60);
        let token = service.generate_admin_token("staff").unwrap();
        let claims = service.verify_admin_token(&token).unwrap();
        assert_eq!(claims.sub, "staff");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 60);
        let verifier = JwtService::new("secret-b", 60);
        let token = issuer.generate_admin_token("staff").unwrap();
        assert!(verifier.verify_admin_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 超出 jsonwebtoken 默认 60 秒 leeway
        let service = JwtService::new("unit-test-secret", -120);
        let token = service.generate_admin_token("staff").unwrap();
        assert!(service.verify_admin_token(&token).is_err());
    }

    #[test]
    fn test_non_admin_role_is_rejected() {
        let service = JwtService::new("unit-test-secret", 60);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "someone".into(),
            role: "customer".into(),
            exp: now + 60,
            iat: now,
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();
        assert!(matches!(
            service.verify_admin_token(&token),
            Err(AppError::AuthError(_))
        ));
    }
}
