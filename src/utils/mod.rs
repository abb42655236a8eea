use axum::Json;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,    // 用户ID
    pub exp: i64,       // 过期时间
    pub iat: i64,       // 签发时间
    pub is_admin: bool, // 管理员标识
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resp_data: Option<T>,
}

// 所有 handler 的统一响应包装
pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: error_codes::SUCCESS,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const AUTH_FAILED: i32 = 1002;
    pub const PERMISSION_DENIED: i32 = 1003;
    pub const RATE_LIMIT: i32 = 1005;
    pub const INTERNAL_ERROR: i32 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn test_config() -> Config {
        Config {
            redis_url: "redis://127.0.0.1/".to_string(),
            jwt_secret: "test-secret".to_string(),
            rate_limit_window_secs: 60,
            rate_limit_requests: 100,
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
        }
    }

    fn mint_token(config: &Config, exp: i64, is_admin: bool) -> String {
        let claims = Claims {
            sub: "admin01".to_string(),
            exp,
            iat: chrono::Utc::now().timestamp(),
            is_admin,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verify_token_roundtrip() {
        let config = test_config();
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = mint_token(&config, exp, true);

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "admin01");
        assert!(claims.is_admin);
    }

    #[test]
    fn verify_token_rejects_expired() {
        let config = test_config();
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = mint_token(&config, exp, true);

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn verify_token_rejects_wrong_secret() {
        let config = test_config();
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = mint_token(&config, exp, false);

        let mut other = test_config();
        other.jwt_secret = "other-secret".to_string();
        assert!(verify_token(&token, &other).is_err());
    }
}
