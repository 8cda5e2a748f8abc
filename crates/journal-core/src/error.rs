//! 트레이딩 저널의 에러 타입.
//!
//! 이 모듈은 저널 시스템 전반에서 사용되는 에러 타입을 정의합니다.
//!
//! 알 수 없는 plan/user id는 에러가 아니라 "일치하는 거래 없음"으로
//! 처리되므로 NotFound 변형은 의도적으로 존재하지 않습니다.

use thiserror::Error;

/// 핵심 저널 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 인증 에러
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 저널 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 치명적인 에러인지 확인합니다.
    pub fn is_critical(&self) -> bool {
        matches!(self, JournalError::Auth(_) | JournalError::Config(_))
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for JournalError {
    fn from(err: sqlx::Error) -> Self {
        JournalError::Database(err.to_string())
    }
}
