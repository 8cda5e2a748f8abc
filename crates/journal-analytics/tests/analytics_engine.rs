//! End-to-end tests for the analytics aggregation engine.
//!
//! Runs the six read operations over an in-memory ledger seeded with
//! reference fixtures and verifies ownership isolation, empty-result
//! shapes, boundary padding, and the equity-curve reconstruction.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use journal_analytics::{AnalyticsEngine, DateWindow, InMemoryTradeLedger};
use journal_core::{PositionType, Symbol, Trade};

fn trade(
    user: Uuid,
    plan: Uuid,
    symbol: Symbol,
    entry: (i32, u32, u32),
    close: (i32, u32, u32),
    net: Decimal,
    balance: Decimal,
) -> Trade {
    Trade::new(
        user,
        plan,
        symbol,
        PositionType::Long,
        Utc.with_ymd_and_hms(entry.0, entry.1, entry.2, 10, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(close.0, close.1, close.2, 16, 45, 0).unwrap(),
    )
    .with_prices(dec!(1.1000), dec!(1.1200), dec!(1.0900))
    .with_profit(net, net)
    .with_balance(balance)
}

/// Seven trades across 2020/2021/2025: five in plan A (2021 and 2025)
/// and two in a second plan (2020). Mirrors the reference fixtures.
struct Fixture {
    user: Uuid,
    plan_a: Uuid,
    plan_b: Uuid,
    engine: AnalyticsEngine,
}

fn fixture() -> Fixture {
    let user = Uuid::new_v4();
    let plan_a = Uuid::new_v4();
    let plan_b = Uuid::new_v4();

    let trades = vec![
        // Plan A, 2021
        trade(user, plan_a, Symbol::EurUsd, (2021, 3, 4), (2021, 3, 4), dec!(120.00), dec!(1120.00)),
        trade(user, plan_a, Symbol::GbpUsd, (2021, 7, 19), (2021, 7, 20), dec!(-30.50), dec!(1089.50)),
        // Plan A, 2025 — three distinct dates
        trade(user, plan_a, Symbol::EurUsd, (2025, 1, 8), (2025, 1, 8), dec!(-45.44), dec!(1044.06)),
        trade(user, plan_a, Symbol::XauUsd, (2025, 2, 12), (2025, 2, 13), dec!(70.24), dec!(1114.30)),
        trade(user, plan_a, Symbol::EurUsd, (2025, 3, 3), (2025, 3, 3), dec!(-45.44), dec!(1068.86)),
        // Plan B, 2020 — must never appear in plan A views
        trade(user, plan_b, Symbol::UsdJpy, (2020, 5, 6), (2020, 5, 6), dec!(15.00), dec!(515.00)),
        trade(user, plan_b, Symbol::UsdJpy, (2020, 8, 14), (2020, 8, 15), dec!(-7.25), dec!(507.75)),
    ];

    Fixture {
        user,
        plan_a,
        plan_b,
        engine: AnalyticsEngine::new(Arc::new(InMemoryTradeLedger::with_trades(trades))),
    }
}

#[tokio::test]
async fn trade_years_are_descending_and_scoped_to_plan() {
    let fx = fixture();
    let cancel = CancellationToken::new();

    let years = fx
        .engine
        .trade_years(Some(fx.user), fx.plan_a, &cancel)
        .await
        .unwrap();
    assert_eq!(years, vec![2025, 2021]);

    let years_b = fx
        .engine
        .trade_years(Some(fx.user), fx.plan_b, &cancel)
        .await
        .unwrap();
    assert_eq!(years_b, vec![2020]);
}

#[tokio::test]
async fn ownership_isolation_hides_other_users_trades() {
    let fx = fixture();
    let stranger = Uuid::new_v4();
    let cancel = CancellationToken::new();

    // Same plan id space, different owner: everything collapses to empty
    let years = fx
        .engine
        .trade_years(Some(stranger), fx.plan_a, &cancel)
        .await
        .unwrap();
    assert!(years.is_empty());

    let stats = fx
        .engine
        .calendar_by_year(Some(stranger), fx.plan_a, 2025, &cancel)
        .await
        .unwrap();
    assert_eq!(stats.total_trade_count, 0);
    assert!(stats.calendar.is_empty());
}

#[tokio::test]
async fn unknown_plan_returns_empty_shapes_not_errors() {
    let fx = fixture();
    let cancel = CancellationToken::new();
    let unknown = Uuid::new_v4();

    assert!(fx
        .engine
        .trade_years(Some(fx.user), unknown, &cancel)
        .await
        .unwrap()
        .is_empty());
    assert!(fx
        .engine
        .chart_balance(Some(fx.user), unknown, &cancel)
        .await
        .unwrap()
        .is_empty());
    assert!(fx
        .engine
        .chart_net_profit(Some(fx.user), unknown, &cancel)
        .await
        .unwrap()
        .is_empty());
    assert!(fx
        .engine
        .symbol_breakdown(Some(fx.user), unknown, DateWindow::unbounded(), &cancel)
        .await
        .unwrap()
        .is_empty());
    assert!(fx
        .engine
        .weekday_breakdown(Some(fx.user), unknown, DateWindow::unbounded(), None, &cancel)
        .await
        .unwrap()
        .is_empty());

    let stats = fx
        .engine
        .calendar_by_year(Some(fx.user), unknown, 2025, &cancel)
        .await
        .unwrap();
    assert_eq!(stats.net_profit, Decimal::ZERO);
    assert_eq!(stats.win_rate, Decimal::ZERO);
}

#[tokio::test]
async fn daily_net_profit_series_matches_reference_fixture() {
    let fx = fixture();
    let cancel = CancellationToken::new();

    let series = fx
        .engine
        .chart_net_profit(Some(fx.user), fx.plan_a, &cancel)
        .await
        .unwrap();

    // 2021 trades plus the three 2025 dates, ascending
    assert_eq!(series.len(), 5);
    let from_2025: Vec<_> = series
        .iter()
        .filter(|p| p.date >= NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        .collect();
    assert_eq!(from_2025.len(), 3);
    assert_eq!(from_2025[0].date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
    assert_eq!(from_2025[0].net_profit, dec!(-45.44));
    assert_eq!(from_2025[1].net_profit, dec!(70.24));
    assert_eq!(from_2025[2].net_profit, dec!(-45.44));
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn balance_series_reconstructs_pre_first_trade_balance() {
    let user = Uuid::new_v4();
    let plan = Uuid::new_v4();
    let single = trade(
        user,
        plan,
        Symbol::EurUsd,
        (2025, 4, 10),
        (2025, 4, 11),
        dec!(50),
        dec!(1000),
    );
    let close_time = single.close_time;
    let engine = AnalyticsEngine::new(Arc::new(InMemoryTradeLedger::with_trades(vec![single])));

    let series = engine
        .chart_balance(Some(user), plan, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    // Synthetic leading point: entry date minus one day, balance before the trade
    assert_eq!(
        series[0].date_time.date_naive(),
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    );
    assert_eq!(series[0].balance, dec!(950));
    assert_eq!(series[1].date_time, close_time);
    assert_eq!(series[1].balance, dec!(1000));
}

#[tokio::test]
async fn balance_series_is_ordered_by_close_time() {
    let fx = fixture();
    let series = fx
        .engine
        .chart_balance(Some(fx.user), fx.plan_a, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(series.len(), 6); // 5 trades + synthetic leading point
    assert!(series
        .windows(2)
        .all(|w| w[0].date_time <= w[1].date_time));
}

#[tokio::test]
async fn date_window_lower_bound_uses_entry_date() {
    // Trade 1: entry 2025-01-05, close 2025-01-06
    // Trade 2: entry 2025-02-01, close 2025-02-10
    let user = Uuid::new_v4();
    let plan = Uuid::new_v4();
    let trades = vec![
        trade(user, plan, Symbol::EurUsd, (2025, 1, 5), (2025, 1, 6), dec!(10), dec!(1010)),
        trade(user, plan, Symbol::GbpUsd, (2025, 2, 1), (2025, 2, 10), dec!(20), dec!(1030)),
    ];
    let engine = AnalyticsEngine::new(Arc::new(InMemoryTradeLedger::with_trades(trades)));
    let cancel = CancellationToken::new();

    let window = DateWindow::new(NaiveDate::from_ymd_opt(2025, 1, 6), None);
    let stats = engine
        .symbol_breakdown(Some(user), plan, window, &cancel)
        .await
        .unwrap();

    // The first trade is excluded on entry date alone; the second passes
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].symbol, Symbol::GbpUsd);
}

#[tokio::test]
async fn weekday_breakdown_is_ascending_by_weekday_index() {
    let fx = fixture();
    let stats = fx
        .engine
        .weekday_breakdown(
            Some(fx.user),
            fx.plan_a,
            DateWindow::unbounded(),
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(!stats.is_empty());
    assert!(stats.windows(2).all(|w| w[0].day_of_week < w[1].day_of_week));
}

#[tokio::test]
async fn calendar_year_2025_aggregates_fixture_trades() {
    let fx = fixture();
    let stats = fx
        .engine
        .calendar_by_year(Some(fx.user), fx.plan_a, 2025, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(stats.total_trade_count, 3);
    assert_eq!(stats.total_win_trade_count, 1);
    assert_eq!(stats.total_loss_trade_count, 2);
    assert_eq!(stats.net_profit, dec!(-20.64));
    assert_eq!(stats.win_rate, dec!(33.33));

    // Boundary padding spans the full year
    let first = stats.calendar.first().unwrap();
    let last = stats.calendar.last().unwrap();
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(first.level, 1);
    assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    assert_eq!(last.level, 1);
    // 3 trading days + 2 padding buckets
    assert_eq!(stats.calendar.len(), 5);
}
