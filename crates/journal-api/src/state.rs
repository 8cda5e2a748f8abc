//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Clone이 저렴하도록 내부 리소스는 Arc로 래핑됩니다.

use std::sync::Arc;

use journal_analytics::{AnalyticsEngine, InMemoryTradeLedger, TradeLedger};
use tokio_util::sync::CancellationToken;

use crate::repository::PgTradeLedger;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 거래 분석 엔진 - 모든 조회 연산의 진입점
    pub engine: AnalyticsEngine,

    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db_pool: Option<sqlx::PgPool>,

    /// 서버 수명 취소 토큰.
    ///
    /// 요청별 child_token을 파생하여 shutdown 시 진행 중인
    /// 분석 연산을 중단합니다.
    pub shutdown: CancellationToken,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 원장 구현으로부터 새로운 AppState 생성.
    pub fn new(ledger: Arc<dyn TradeLedger>) -> Self {
        Self {
            engine: AnalyticsEngine::new(ledger),
            db_pool: None,
            shutdown: CancellationToken::new(),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 원장을 사용하는 AppState 생성.
    pub fn with_pg_pool(pool: sqlx::PgPool) -> Self {
        let mut state = Self::new(Arc::new(PgTradeLedger::new(pool.clone())));
        state.db_pool = Some(pool);
        state
    }

    /// 인메모리 원장을 사용하는 AppState 생성.
    ///
    /// DATABASE_URL이 없는 개발 환경에서 사용됩니다.
    pub fn with_in_memory_ledger(ledger: InMemoryTradeLedger) -> Self {
        Self::new(Arc::new(ledger))
    }

    /// 요청 범위 취소 토큰 파생.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 실제 DB 연결 없이 시드된 인메모리 원장으로 상태를 생성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state(trades: Vec<journal_core::Trade>) -> AppState {
    AppState::with_in_memory_ledger(InMemoryTradeLedger::with_trades(trades))
}
