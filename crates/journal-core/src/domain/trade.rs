//! 거래 기록.
//!
//! 이 모듈은 저널에 기록된 개별 거래를 정의합니다.
//! 분석 엔진 관점에서 거래는 불변이며, 엔진은 거래를 생성/수정/삭제하지
//! 않고 이미 계산된 손익 필드를 집계하기만 합니다.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Symbol;

/// 포지션 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "text", rename_all = "lowercase")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum PositionType {
    /// 매수 포지션
    Long,
    /// 매도 포지션
    Short,
}

/// 저널에 기록된 개별 거래.
///
/// `balance`는 이 거래가 청산된 직후의 계좌 잔고로, 저장된 사실이며
/// 재계산되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Trade {
    /// 거래 ID
    pub id: Uuid,
    /// 소유 사용자 ID
    pub user_id: Uuid,
    /// 소속 트레이딩 플랜 ID
    pub plan_id: Uuid,
    /// 거래 심볼
    pub symbol: Symbol,
    /// 포지션 방향
    pub position_type: PositionType,
    /// 거래량 (랏)
    pub volume: Decimal,
    /// 진입 가격
    pub entry_price: Decimal,
    /// 청산 가격
    pub close_price: Decimal,
    /// 손절 가격
    pub stop_loss_price: Decimal,
    /// 진입 시각
    pub entry_time: DateTime<Utc>,
    /// 청산 시각 (진입 시각 이후로 기대되지만 여기서 재검증하지 않음)
    pub close_time: DateTime<Utc>,
    /// 수수료 (0 이하)
    pub commission: Decimal,
    /// 스왑
    pub swap: Decimal,
    /// 핍 수
    pub pips: Decimal,
    /// 순손익 (수수료/스왑 반영)
    pub net_profit: Decimal,
    /// 총손익
    pub gross_profit: Decimal,
    /// 청산 직후 계좌 잔고
    pub balance: Decimal,
}

impl Trade {
    /// 새 거래 기록을 생성합니다.
    pub fn new(
        user_id: Uuid,
        plan_id: Uuid,
        symbol: Symbol,
        position_type: PositionType,
        entry_time: DateTime<Utc>,
        close_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            symbol,
            position_type,
            volume: Decimal::ONE,
            entry_price: Decimal::ZERO,
            close_price: Decimal::ZERO,
            stop_loss_price: Decimal::ZERO,
            entry_time,
            close_time,
            commission: Decimal::ZERO,
            swap: Decimal::ZERO,
            pips: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// 가격 정보를 설정합니다.
    pub fn with_prices(mut self, entry: Decimal, close: Decimal, stop_loss: Decimal) -> Self {
        self.entry_price = entry;
        self.close_price = close;
        self.stop_loss_price = stop_loss;
        self
    }

    /// 손익 정보를 설정합니다.
    pub fn with_profit(mut self, net: Decimal, gross: Decimal) -> Self {
        self.net_profit = net;
        self.gross_profit = gross;
        self
    }

    /// 청산 후 잔고를 설정합니다.
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// 거래량을 설정합니다.
    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = volume;
        self
    }

    /// 진입 시각의 달력 날짜를 반환합니다.
    pub fn entry_date(&self) -> NaiveDate {
        self.entry_time.date_naive()
    }

    /// 청산 시각의 달력 날짜를 반환합니다.
    pub fn close_date(&self) -> NaiveDate {
        self.close_time.date_naive()
    }

    /// 순손익 기준 수익 거래인지 확인합니다.
    ///
    /// 순손익이 정확히 0인 거래는 승/패 어느 쪽도 아닙니다.
    pub fn is_win(&self) -> bool {
        self.net_profit > Decimal::ZERO
    }

    /// 순손익 기준 손실 거래인지 확인합니다.
    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_trade(net: Decimal) -> Trade {
        let entry = Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap();
        let close = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
        Trade::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Symbol::EurUsd,
            PositionType::Long,
            entry,
            close,
        )
        .with_profit(net, net)
    }

    #[test]
    fn test_entry_and_close_dates() {
        let trade = sample_trade(dec!(10));
        assert_eq!(
            trade.entry_date(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert_eq!(trade.entry_date(), trade.close_date());
    }

    #[test]
    fn test_win_loss_classification() {
        assert!(sample_trade(dec!(5)).is_win());
        assert!(sample_trade(dec!(-5)).is_loss());

        // 손익 0 거래는 승도 패도 아님
        let flat = sample_trade(dec!(0));
        assert!(!flat.is_win());
        assert!(!flat.is_loss());
    }
}
