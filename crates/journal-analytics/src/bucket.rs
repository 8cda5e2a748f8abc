//! 집계 프리미티브.
//!
//! 날짜/심볼/요일 버킷 리듀서와 0-나눗셈에 안전한 비율 계산을
//! 제공합니다. 모든 금액 집계는 거래에 이미 저장된 손익 필드의 합이며,
//! 가격에서 손익을 재계산하지 않습니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use journal_core::{DecimalExt, Trade};
use rust_decimal::Decimal;

/// 하루치 거래 집계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayAggregate {
    /// 해당 날짜 순손익 합계 (반올림 전)
    pub net_profit: Decimal,
    /// 해당 날짜 거래 수
    pub trade_count: u32,
}

/// 진입 날짜 기준으로 거래를 일별 집계합니다.
///
/// `BTreeMap`이므로 순회는 항상 날짜 오름차순입니다.
pub fn aggregate_by_entry_date<'a, I>(trades: I) -> BTreeMap<NaiveDate, DayAggregate>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut days: BTreeMap<NaiveDate, DayAggregate> = BTreeMap::new();
    for trade in trades {
        let day = days.entry(trade.entry_date()).or_default();
        day.net_profit += trade.net_profit;
        day.trade_count += 1;
    }
    days
}

/// 일별 순손익 합계를 달력 레벨로 분류합니다.
///
/// 2 = 순이익, 0 = 순손실, 1 = 중립(손익 0 또는 거래 없음).
pub fn profit_level(net_profit: Decimal) -> u8 {
    if net_profit > Decimal::ZERO {
        2
    } else if net_profit < Decimal::ZERO {
        0
    } else {
        1
    }
}

/// 거래 한 건의 보상/위험 비율을 계산합니다.
///
/// `|청산가 - 진입가| / |진입가 - 손절가|`. 손절 거리가 0이면 비율도
/// 0으로 취급하며, 그 거래는 평균에서 제외되지 않고 0으로 참여합니다.
pub fn reward_ratio(trade: &Trade) -> Decimal {
    let risk = (trade.entry_price - trade.stop_loss_price).abs();
    if risk.is_zero() {
        return Decimal::ZERO;
    }
    (trade.close_price - trade.entry_price).abs() / risk
}

/// 승률(%)을 계산합니다. 거래가 없으면 0입니다.
pub fn win_rate(win_count: usize, total_count: usize) -> Decimal {
    if total_count == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(win_count as u64) / Decimal::from(total_count as u64) * Decimal::from(100))
        .round_money()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use journal_core::{PositionType, Symbol};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn trade_on(day: u32, net: Decimal) -> Trade {
        Trade::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Symbol::UsdJpy,
            PositionType::Long,
            Utc.with_ymd_and_hms(2025, 4, day, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 4, day, 17, 0, 0).unwrap(),
        )
        .with_profit(net, net)
    }

    #[test]
    fn test_aggregate_by_entry_date() {
        let trades = vec![
            trade_on(2, dec!(10)),
            trade_on(2, dec!(-4)),
            trade_on(5, dec!(7)),
        ];
        let days = aggregate_by_entry_date(&trades);

        assert_eq!(days.len(), 2);
        let apr2 = days[&NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()];
        assert_eq!(apr2.net_profit, dec!(6));
        assert_eq!(apr2.trade_count, 2);

        // BTreeMap 순회는 오름차순
        let dates: Vec<_> = days.keys().copied().collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_profit_level() {
        assert_eq!(profit_level(dec!(0.01)), 2);
        assert_eq!(profit_level(dec!(-0.01)), 0);
        assert_eq!(profit_level(Decimal::ZERO), 1);
    }

    #[test]
    fn test_reward_ratio() {
        let trade = trade_on(1, dec!(0)).with_prices(dec!(1.10), dec!(1.16), dec!(1.08));
        // |1.16-1.10| / |1.10-1.08| = 0.06 / 0.02 = 3
        assert_eq!(reward_ratio(&trade), dec!(3));
    }

    #[test]
    fn test_reward_ratio_zero_stop_distance() {
        // 진입가 == 손절가: 나눗셈 에러 없이 0
        let trade = trade_on(1, dec!(0)).with_prices(dec!(1.10), dec!(1.20), dec!(1.10));
        assert_eq!(reward_ratio(&trade), Decimal::ZERO);
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(0, 0), Decimal::ZERO);
        assert_eq!(win_rate(1, 3), dec!(33.33));
        assert_eq!(win_rate(2, 3), dec!(66.67));
        assert_eq!(win_rate(3, 3), dec!(100.00));
    }

    proptest! {
        /// 임의의 가격 조합에서 reward_ratio는 패닉하지 않고 음수가 아니다.
        #[test]
        fn prop_reward_ratio_never_panics(
            entry in 1i64..1_000_000,
            close in 1i64..1_000_000,
            stop in 1i64..1_000_000,
        ) {
            let trade = trade_on(1, dec!(0)).with_prices(
                Decimal::new(entry, 4),
                Decimal::new(close, 4),
                Decimal::new(stop, 4),
            );
            let ratio = reward_ratio(&trade);
            prop_assert!(ratio >= Decimal::ZERO);
            if entry == stop {
                prop_assert_eq!(ratio, Decimal::ZERO);
            }
        }
    }
}
