//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! 알 수 없는 plan id는 404가 아니라 빈/0 응답으로 처리되므로,
//! 어떤 핸들러도 NotFound를 매핑하지 않습니다. 호출자는 "플랜 없음",
//! "남의 플랜", "거래 없는 플랜"을 구별할 수 없습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use journal_analytics::AnalyticsError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답 본문.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_SYMBOL",
///   "message": "알 수 없는 심볼: DOGEUSD",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "UNAUTHORIZED", "INVALID_DATE_RANGE")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(Utc::now().timestamp()),
        }
    }

    /// 상세 정보를 추가합니다.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API 핸들러 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 인증된 호출자 없음
    #[error("인증된 호출자가 없습니다")]
    Unauthorized,

    /// 연산 취소됨
    #[error("연산이 취소되었습니다")]
    Cancelled,

    /// 잘못된 요청 파라미터
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// API 핸들러를 위한 Result 타입.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::Unauthorized => ApiError::Unauthorized,
            AnalyticsError::Cancelled => ApiError::Cancelled,
            AnalyticsError::Ledger(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "OPERATION_CANCELLED"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(ApiErrorResponse::new(code, self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::JournalError;

    #[test]
    fn test_analytics_error_mapping() {
        assert!(matches!(
            ApiError::from(AnalyticsError::Unauthorized),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(AnalyticsError::Cancelled),
            ApiError::Cancelled
        ));
        assert!(matches!(
            ApiError::from(AnalyticsError::Ledger(JournalError::Database(
                "down".to_string()
            ))),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::BadRequest("bad".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("oops".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body() {
        let body = ApiErrorResponse::new("INVALID_INPUT", "bad year");
        assert_eq!(body.code, "INVALID_INPUT");
        assert!(body.timestamp.is_some());
        assert!(body.details.is_none());
    }
}
