//! 분석 엔진.
//!
//! 여섯 가지 읽기 연산을 제공합니다:
//! - 거래 연도 목록
//! - 연간 달력 통계
//! - 자산 곡선 / 일별 순손익 시계열
//! - 심볼별 / 요일별 손익 분해
//!
//! 모든 연산은 동일한 순서를 따릅니다: 호출자 검증 → (해당 시)
//! 날짜 구간 정규화 → 원장 읽기 → 리듀스 → 경계 반올림.
//! 원장 읽기는 취소 토큰과 경쟁하며, 취소 시 부분 결과 없이
//! [`AnalyticsError::Cancelled`]만 반환됩니다.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use journal_core::{DecimalExt, Symbol, Trade};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::bucket;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::ledger::TradeLedger;
use crate::types::{
    BalancePoint, CalendarDayBucket, NetProfitPoint, SymbolStat, WeekdayStat, YearStats,
};
use crate::window::DateWindow;

/// 거래 분석 집계 엔진.
///
/// 내부에 공유 가변 상태가 없으므로 모든 연산은 서로 병렬로 실행될 수
/// 있습니다.
#[derive(Clone)]
pub struct AnalyticsEngine {
    ledger: Arc<dyn TradeLedger>,
}

impl AnalyticsEngine {
    /// 주어진 원장 위에 엔진을 생성합니다.
    pub fn new(ledger: Arc<dyn TradeLedger>) -> Self {
        Self { ledger }
    }

    /// 호출자 신원을 검증합니다. 신원이 없으면 원장에 접근하기 전에
    /// 실패합니다.
    fn authorize(caller: Option<Uuid>) -> AnalyticsResult<Uuid> {
        caller.ok_or(AnalyticsError::Unauthorized)
    }

    /// 취소 토큰과 경쟁하며 원장을 읽습니다.
    async fn load(
        &self,
        owner_id: Uuid,
        plan_id: Uuid,
        window: &DateWindow,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<Vec<Trade>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AnalyticsError::Cancelled),
            result = self.ledger.fetch_trades(owner_id, plan_id, window) => Ok(result?),
        }
    }

    /// 플랜에 거래가 존재하는 연도를 내림차순으로 반환합니다.
    ///
    /// 연도는 진입 시각 기준이며, 거래가 없으면 빈 목록입니다.
    pub async fn trade_years(
        &self,
        caller: Option<Uuid>,
        plan_id: Uuid,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<Vec<i32>> {
        let owner_id = Self::authorize(caller)?;
        let trades = self
            .load(owner_id, plan_id, &DateWindow::unbounded(), cancel)
            .await?;

        let mut years: Vec<i32> = trades.iter().map(|t| t.entry_time.year()).collect();
        years.sort_unstable();
        years.dedup();
        years.reverse();

        debug!(%plan_id, count = years.len(), "거래 연도 조회");
        Ok(years)
    }

    /// 한 해의 달력 통계를 계산합니다.
    ///
    /// 해당 연도에 일치하는 거래가 없으면 모든 집계가 0이고 달력이 빈
    /// 센티널을 반환합니다. 거래가 있으면 달력의 양 끝을 1월 1일 /
    /// 12월 31일 중립 버킷으로 패딩하여 항상 한 해 전체를 덮습니다.
    pub async fn calendar_by_year(
        &self,
        caller: Option<Uuid>,
        plan_id: Uuid,
        year: i32,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<YearStats> {
        let owner_id = Self::authorize(caller)?;
        let trades = self
            .load(owner_id, plan_id, &DateWindow::unbounded(), cancel)
            .await?;

        let yearly: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.entry_time.year() == year)
            .collect();

        if yearly.is_empty() {
            debug!(%plan_id, year, "해당 연도 거래 없음");
            return Ok(YearStats::default());
        }

        let total = yearly.len();
        let wins = yearly.iter().filter(|t| t.is_win()).count();
        let losses = yearly.iter().filter(|t| t.is_loss()).count();

        let net_profit: Decimal = yearly.iter().map(|t| t.net_profit).sum();
        let gross_profit: Decimal = yearly.iter().map(|t| t.gross_profit).sum();

        // 손절 거리가 0인 거래도 0으로 평균에 참여한다.
        let ratio_sum: Decimal = yearly.iter().map(|t| bucket::reward_ratio(t)).sum();
        let risk_to_reward_mean = (ratio_sum / Decimal::from(total as u64)).round_money();

        let days = bucket::aggregate_by_entry_date(yearly.iter().copied());
        let mut calendar: Vec<CalendarDayBucket> = days
            .iter()
            .map(|(date, day)| CalendarDayBucket {
                date: *date,
                count: Some(day.trade_count),
                level: bucket::profit_level(day.net_profit),
            })
            .collect();

        Self::pad_year_bounds(&mut calendar, year);

        Ok(YearStats {
            calendar,
            risk_to_reward_mean,
            win_rate: bucket::win_rate(wins, total),
            total_trade_count: total as u32,
            total_win_trade_count: wins as u32,
            total_loss_trade_count: losses as u32,
            net_profit: net_profit.round_money(),
            gross_profit: gross_profit.round_money(),
        })
    }

    /// 달력 양 끝이 한 해 경계를 덮도록 중립 버킷을 보충합니다.
    ///
    /// `calendar`는 날짜 오름차순이고 모든 날짜가 해당 연도 안이라고
    /// 가정합니다. 실제 거래일이 이미 경계 날짜면 추가하지 않습니다.
    fn pad_year_bounds(calendar: &mut Vec<CalendarDayBucket>, year: i32) {
        let (Some(jan_first), Some(dec_last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return;
        };

        if calendar.first().map(|b| b.date) != Some(jan_first) {
            calendar.insert(
                0,
                CalendarDayBucket {
                    date: jan_first,
                    count: None,
                    level: 1,
                },
            );
        }
        if calendar.last().map(|b| b.date) != Some(dec_last) {
            calendar.push(CalendarDayBucket {
                date: dec_last,
                count: None,
                level: 1,
            });
        }
    }

    /// 자산 곡선(잔고 시계열)을 청산 시각 오름차순으로 재구성합니다.
    ///
    /// 첫 거래의 진입 날짜 하루 전에, 첫 거래의 효과가 반영되기 전
    /// 잔고(`balance - net_profit`)를 가진 선행 포인트를 하나 합성합니다.
    /// 빈 원장에는 합성 포인트를 추가하지 않습니다. 잔고 값은 거래
    /// 기록 그대로이며 반올림하지 않습니다.
    pub async fn chart_balance(
        &self,
        caller: Option<Uuid>,
        plan_id: Uuid,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<Vec<BalancePoint>> {
        let owner_id = Self::authorize(caller)?;
        let mut trades = self
            .load(owner_id, plan_id, &DateWindow::unbounded(), cancel)
            .await?;

        trades.sort_by_key(|t| t.close_time);

        let Some(first) = trades.first() else {
            return Ok(Vec::new());
        };

        let lead_date = first.entry_date() - Duration::days(1);
        let mut series = Vec::with_capacity(trades.len() + 1);
        series.push(BalancePoint {
            date_time: lead_date.and_time(NaiveTime::MIN).and_utc(),
            balance: first.balance - first.net_profit,
        });
        series.extend(trades.iter().map(|t| BalancePoint {
            date_time: t.close_time,
            balance: t.balance,
        }));

        Ok(series)
    }

    /// 일별 순손익 시계열을 날짜 오름차순으로 반환합니다.
    ///
    /// 진입 날짜 기준으로 전체 원장을 묶으며, 빈 원장이면 빈 목록입니다.
    pub async fn chart_net_profit(
        &self,
        caller: Option<Uuid>,
        plan_id: Uuid,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<Vec<NetProfitPoint>> {
        let owner_id = Self::authorize(caller)?;
        let trades = self
            .load(owner_id, plan_id, &DateWindow::unbounded(), cancel)
            .await?;

        let days = bucket::aggregate_by_entry_date(&trades);
        Ok(days
            .iter()
            .map(|(date, day)| NetProfitPoint {
                date: *date,
                net_profit: day.net_profit.round_money(),
            })
            .collect())
    }

    /// 날짜 구간 안의 거래를 심볼별로 묶어 손익을 합산합니다.
    pub async fn symbol_breakdown(
        &self,
        caller: Option<Uuid>,
        plan_id: Uuid,
        window: DateWindow,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<Vec<SymbolStat>> {
        let owner_id = Self::authorize(caller)?;
        let trades = self.load(owner_id, plan_id, &window, cancel).await?;

        let mut by_symbol: std::collections::BTreeMap<Symbol, (Decimal, Decimal)> =
            std::collections::BTreeMap::new();
        for trade in &trades {
            let sums = by_symbol.entry(trade.symbol).or_default();
            sums.0 += trade.net_profit;
            sums.1 += trade.gross_profit;
        }

        Ok(by_symbol
            .into_iter()
            .map(|(symbol, (net, gross))| SymbolStat {
                symbol,
                net_profit: net.round_money(),
                gross_profit: gross.round_money(),
            })
            .collect())
    }

    /// 날짜 구간(및 선택적 심볼 필터) 안의 거래를 요일별로 묶어
    /// 손익을 합산합니다. 결과는 요일 인덱스(0 = 일요일) 오름차순입니다.
    pub async fn weekday_breakdown(
        &self,
        caller: Option<Uuid>,
        plan_id: Uuid,
        window: DateWindow,
        symbol: Option<Symbol>,
        cancel: &CancellationToken,
    ) -> AnalyticsResult<Vec<WeekdayStat>> {
        let owner_id = Self::authorize(caller)?;
        let trades = self.load(owner_id, plan_id, &window, cancel).await?;

        let mut by_weekday: std::collections::BTreeMap<u8, (Decimal, Decimal)> =
            std::collections::BTreeMap::new();
        for trade in trades
            .iter()
            .filter(|t| symbol.map_or(true, |s| t.symbol == s))
        {
            let weekday = trade.entry_time.weekday().num_days_from_sunday() as u8;
            let sums = by_weekday.entry(weekday).or_default();
            sums.0 += trade.net_profit;
            sums.1 += trade.gross_profit;
        }

        Ok(by_weekday
            .into_iter()
            .map(|(day_of_week, (net, gross))| WeekdayStat {
                day_of_week,
                net_profit: net.round_money(),
                gross_profit: gross.round_money(),
            })
            .collect())
    }
}
