//! 정밀한 금융 계산을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 거래량을 위한 타입.
pub type Volume = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 금액을 소수점 2자리로 반올림합니다 (midpoint away from zero).
    ///
    /// 모든 금액 집계는 엔진 경계에서 이 규칙으로 반올림됩니다.
    fn round_money(&self) -> Decimal;

    /// 지정된 소수점 자릿수로 반올림합니다.
    fn round_away(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn round_money(&self) -> Decimal {
        self.round_away(2)
    }

    fn round_away(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money() {
        assert_eq!(dec!(1.005).round_money(), dec!(1.01));
        assert_eq!(dec!(-1.005).round_money(), dec!(-1.01));
        assert_eq!(dec!(70.239).round_money(), dec!(70.24));
        assert_eq!(dec!(-45.444).round_money(), dec!(-45.44));
        assert_eq!(dec!(3).round_money(), dec!(3.00));
    }

    #[test]
    fn test_round_away_dp() {
        assert_eq!(dec!(0.12345).round_away(4), dec!(0.1235));
        assert_eq!(dec!(0.12344).round_away(4), dec!(0.1234));
    }
}
