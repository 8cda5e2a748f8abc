//! 분석 응답 타입.
//!
//! 엔진 경계를 떠나는 모든 금액 필드는 소수점 2자리로 반올림되어
//! 있습니다. 와이어 형식은 camelCase JSON입니다.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 연간 달력의 하루 버킷.
///
/// `level`: 2 = 순이익, 0 = 순손실, 1 = 중립(거래 없음/손익 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct CalendarDayBucket {
    /// 달력 날짜
    pub date: NaiveDate,
    /// 해당 날짜 거래 수 (경계 패딩 버킷에는 없음)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// 손익 레벨 (0, 1, 2)
    pub level: u8,
}

/// 한 해의 집계 통계.
///
/// 일치하는 거래가 없으면 모든 숫자 필드가 0이고 달력은 비어 있습니다
/// (이 경우 경계 패딩도 없습니다).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct YearStats {
    /// 일별 버킷, 날짜 오름차순
    pub calendar: Vec<CalendarDayBucket>,
    /// 보상/위험 비율 평균 (2dp)
    pub risk_to_reward_mean: Decimal,
    /// 승률 % (2dp)
    pub win_rate: Decimal,
    /// 전체 거래 수
    pub total_trade_count: u32,
    /// 수익 거래 수 (순손익 > 0)
    pub total_win_trade_count: u32,
    /// 손실 거래 수 (순손익 < 0)
    pub total_loss_trade_count: u32,
    /// 순손익 합계 (2dp)
    pub net_profit: Decimal,
    /// 총손익 합계 (2dp)
    pub gross_profit: Decimal,
}

/// 자산 곡선의 한 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct BalancePoint {
    /// 시각 (청산 시각, 선행 합성 포인트는 자정)
    pub date_time: DateTime<Utc>,
    /// 계좌 잔고 (거래 기록 값 그대로, 반올림 없음)
    pub balance: Decimal,
}

/// 일별 순손익 시계열의 한 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NetProfitPoint {
    /// 달력 날짜 (ISO)
    pub date: NaiveDate,
    /// 해당 날짜 순손익 합계 (2dp)
    pub net_profit: Decimal,
}

/// 심볼별 손익 분해.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct SymbolStat {
    /// 거래 심볼
    pub symbol: journal_core::Symbol,
    /// 순손익 합계 (2dp)
    pub net_profit: Decimal,
    /// 총손익 합계 (2dp)
    pub gross_profit: Decimal,
}

/// 요일별 손익 분해.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct WeekdayStat {
    /// 요일 (0 = 일요일 .. 6 = 토요일)
    pub day_of_week: u8,
    /// 순손익 합계 (2dp)
    pub net_profit: Decimal,
    /// 총손익 합계 (2dp)
    pub gross_profit: Decimal,
}
