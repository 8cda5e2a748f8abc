//! 분석 엔진의 에러 타입.
//!
//! 에러 분류는 의도적으로 작습니다. 알 수 없는 plan id나 범위 밖 필터는
//! 에러가 아니라 "일치하는 거래 없음"의 빈/0 응답으로 처리되므로,
//! NotFound 변형은 존재하지 않습니다.

use journal_core::JournalError;
use thiserror::Error;

/// 분석 연산 에러.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 인증된 호출자 없음. 원장 접근 전에 즉시 반환됩니다.
    #[error("인증된 호출자가 없습니다")]
    Unauthorized,

    /// 호출자가 연산을 중단함. 부분 결과는 반환되지 않습니다.
    #[error("연산이 취소되었습니다")]
    Cancelled,

    /// 원장 읽기 실패. 재시도 없이 호출자에게 그대로 전파됩니다.
    #[error("원장 읽기 실패: {0}")]
    Ledger(#[from] JournalError),
}

/// 분석 연산을 위한 Result 타입.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// 취소로 인한 중단인지 확인합니다.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnalyticsError::Cancelled)
    }
}
