//! 날짜 구간 필터.
//!
//! 심볼별/요일별 분해 쿼리가 공유하는 from/to 날짜 경계를 하나의
//! 필터 값으로 정규화합니다.

use chrono::NaiveDate;
use journal_core::Trade;

/// 선택적 from/to 날짜 경계로 이루어진 날짜 구간.
///
/// 경계 의미는 비대칭입니다: 하한은 **진입 날짜**, 상한은 **청산 날짜**에
/// 대해 검사합니다. 두 경계가 모두 없으면 모든 거래가 통과합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    /// 하한 (진입 날짜 >= from)
    pub from: Option<NaiveDate>,
    /// 상한 (청산 날짜 <= to)
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// 선택적 경계에서 구간을 생성합니다.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// 필터링 없는 전체 구간을 반환합니다.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// 경계가 하나도 없는지 확인합니다.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// 거래가 이 구간에 포함되는지 확인합니다.
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(from) = self.from {
            if trade.entry_date() < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if trade.close_date() > to {
                return false;
            }
        }
        true
    }
}
