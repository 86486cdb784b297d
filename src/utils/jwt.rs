//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para la emisión y verificación
//! de tokens de acceso firmados con el secreto compartido.

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::environment::EnvironmentConfig,
    models::user::Role,
    utils::errors::AppError,
};

/// Claims del JWT token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // user id
    pub email: String, // user email
    pub role: String,  // admin | mechanic | customer
    pub exp: usize,    // expiration timestamp
    pub iat: usize,    // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar JWT token para un usuario
pub fn generate_token(
    user_id: i64,
    email: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token
///
/// Distingue expiración del resto de fallos de verificación para que la
/// API pueda responder `Token expired` vs `Invalid token`.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AppError::Unauthorized("Token expired".to_string())
            }
            _ => AppError::Unauthorized("Invalid token".to_string()),
        })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let config = test_config();
        let token = generate_token(42, "mechanic@taller.com", Role::Mechanic, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "mechanic@taller.com");
        assert_eq!(claims.role, "mechanic");
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = test_config();
        let token = generate_token(1, "admin@taller.com", Role::Admin, &config).unwrap();

        let other = JwtConfig {
            secret: "other-secret".to_string(),
            expiration: 3600,
        };
        let error = verify_token(&token, &other).unwrap_err();
        match error {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid token"),
            _ => panic!("expected unauthorized"),
        }
    }

    #[test]
    fn test_verify_token_expired() {
        let config = test_config();
        let now = chrono::Utc::now();

        // Token emitido hace dos horas con un segundo de vida
        let claims = JwtClaims {
            sub: "1".to_string(),
            email: "admin@taller.com".to_string(),
            role: "admin".to_string(),
            exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(3)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_ref()),
        )
        .unwrap();

        let error = verify_token(&token, &config).unwrap_err();
        match error {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Token expired"),
            _ => panic!("expected unauthorized"),
        }
    }

    #[test]
    fn test_verify_garbage_token() {
        let config = test_config();
        let error = verify_token("not-a-token", &config).unwrap_err();
        match error {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid token"),
            _ => panic!("expected unauthorized"),
        }
    }
}
