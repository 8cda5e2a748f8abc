//! PostgreSQL 거래 원장.
//!
//! `trades` 테이블을 [`TradeLedger`] 인터페이스로 노출합니다.
//! 엔진과 동일한 비대칭 날짜 구간(진입 날짜 하한, 청산 날짜 상한)을
//! SQL에서 적용합니다.

use async_trait::async_trait;
use journal_analytics::{DateWindow, TradeLedger};
use journal_core::{JournalResult, Trade};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL 기반 거래 원장.
#[derive(Clone)]
pub struct PgTradeLedger {
    pool: PgPool,
}

impl PgTradeLedger {
    /// 커넥션 풀에서 원장을 생성합니다.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TradeLedger for PgTradeLedger {
    async fn fetch_trades(
        &self,
        owner_id: Uuid,
        plan_id: Uuid,
        window: &DateWindow,
    ) -> JournalResult<Vec<Trade>> {
        let trades = sqlx::query_as::<_, Trade>(
            r#"
            SELECT id, user_id, plan_id, symbol, position_type, volume,
                   entry_price, close_price, stop_loss_price,
                   entry_time, close_time,
                   commission, swap, pips,
                   net_profit, gross_profit, balance
            FROM trades
            WHERE user_id = $1
                AND plan_id = $2
                AND ($3::date IS NULL OR entry_time::date >= $3)
                AND ($4::date IS NULL OR close_time::date <= $4)
            ORDER BY entry_time ASC
            "#,
        )
        .bind(owner_id)
        .bind(plan_id)
        .bind(window.from)
        .bind(window.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(trades)
    }
}
