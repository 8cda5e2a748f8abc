//! Axum용 JWT 인증 추출기.
//!
//! 모든 분석 엔드포인트는 이 추출기를 통해 인증된 호출자 신원을
//! 얻습니다. 엔진은 신원을 명시적 파라미터로만 받으며, 전역/세션
//! 상태를 읽지 않습니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{decode_token, Claims};
use crate::error::ApiErrorResponse;

/// 개발/테스트 환경용 기본 시크릿. 운영환경에서는 반드시 설정해야 합니다.
pub const DEV_JWT_SECRET: &str = "development-secret-key-change-in-production";

/// JWT 인증 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let code = match &self {
            JwtAuthError::MissingToken => "MISSING_TOKEN",
            JwtAuthError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            JwtAuthError::TokenExpired => "TOKEN_EXPIRED",
            JwtAuthError::InvalidToken => "INVALID_TOKEN",
        };

        let body = Json(ApiErrorResponse::new(code, self.to_string()));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// JWT 비밀 키 저장소.
///
/// Extension 레이어로 라우터에 주입됩니다.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(JwtAuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtAuthError::InvalidAuthHeader)?;

        let jwt_secret = parts
            .extensions
            .get::<JwtConfig>()
            .map(|c| c.secret.clone())
            .unwrap_or_else(|| {
                std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string())
            });

        let token_data = decode_token(token, &jwt_secret).map_err(|e| match e {
            super::jwt::JwtError::TokenExpired => JwtAuthError::TokenExpired,
            _ => JwtAuthError::InvalidToken,
        })?;

        Ok(JwtAuth(token_data.claims))
    }
}
