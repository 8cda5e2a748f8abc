//! 거래 원장 접근.
//!
//! 엔진은 원장을 읽기 전용 스냅샷으로만 소비합니다. 저장 기술은 이
//! 트레이트 뒤에 숨겨지며, 모든 구현은 소유권 필터
//! (`user_id == owner AND plan_id == plan`)와 날짜 구간을 동일하게
//! 적용해야 합니다.

use async_trait::async_trait;
use journal_core::{JournalResult, Trade};
use uuid::Uuid;

use crate::window::DateWindow;

/// 거래 원장 읽기 인터페이스.
#[async_trait]
pub trait TradeLedger: Send + Sync {
    /// 소유자/플랜에 속하고 날짜 구간을 통과하는 거래를 반환합니다.
    ///
    /// 알 수 없거나 남의 plan id는 에러가 아니라 빈 결과를 냅니다.
    async fn fetch_trades(
        &self,
        owner_id: Uuid,
        plan_id: Uuid,
        window: &DateWindow,
    ) -> JournalResult<Vec<Trade>>;
}

/// 인메모리 거래 원장.
///
/// 테스트와 데이터베이스가 설정되지 않은 환경에서 사용됩니다.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeLedger {
    trades: Vec<Trade>,
}

impl InMemoryTradeLedger {
    /// 빈 원장을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 거래들로 원장을 생성합니다.
    pub fn with_trades(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    /// 원장에 기록된 전체 거래 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// 원장이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[async_trait]
impl TradeLedger for InMemoryTradeLedger {
    async fn fetch_trades(
        &self,
        owner_id: Uuid,
        plan_id: Uuid,
        window: &DateWindow,
    ) -> JournalResult<Vec<Trade>> {
        Ok(self
            .trades
            .iter()
            .filter(|t| t.user_id == owner_id && t.plan_id == plan_id)
            .filter(|t| window.matches(t))
            .cloned()
            .collect())
    }
}
