//! 거래 분석 집계 엔진.
//!
//! 플랜별 거래 원장(append-only)을 달력 히트맵, 자산 곡선, 손익 분해로
//! 환산하는 읽기 전용 쿼리를 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 거래 연도 목록 및 연간 달력 통계
//! - 자산 곡선(잔고) 및 일별 순손익 시계열
//! - 심볼별/요일별 손익 분해
//! - 날짜 구간 필터 및 집계 프리미티브
//!
//! 모든 연산은 불변 스냅샷에 대한 순수 리덕션이며, 소유권 검사를
//! 동일하게 적용하고 취소 토큰으로 중단할 수 있습니다.
//!
//! # Re-exports
//!
//! - [`engine`]: 분석 엔진 (여섯 가지 읽기 연산)
//! - [`ledger`]: 거래 원장 접근 트레이트 및 인메모리 구현
//! - [`types`]: 응답 타입 (YearStats, BalancePoint 등)

pub mod bucket;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod types;
pub mod window;

pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, AnalyticsResult};
pub use ledger::{InMemoryTradeLedger, TradeLedger};
pub use types::{
    BalancePoint, CalendarDayBucket, NetProfitPoint, SymbolStat, WeekdayStat, YearStats,
};
pub use window::DateWindow;
