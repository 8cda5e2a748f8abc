//! 거래 분석 API 엔드포인트.
//!
//! 계획(plan) 단위로 집계된 읽기 전용 분석 뷰를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/plans/{plan_id}/analytics/years` - 거래가 있는 연도 목록
//! - `GET /api/v1/plans/{plan_id}/analytics/calendar?year=` - 연간 손익 캘린더
//! - `GET /api/v1/plans/{plan_id}/analytics/chart/balance` - 잔고 곡선
//! - `GET /api/v1/plans/{plan_id}/analytics/chart/net-profit` - 일별 순손익 시리즈
//! - `GET /api/v1/plans/{plan_id}/analytics/symbols?fromDate=&toDate=` - 종목별 손익
//! - `GET /api/v1/plans/{plan_id}/analytics/weekdays?fromDate=&toDate=&symbol=` - 요일별 손익
//!
//! 존재하지 않거나 타인 소유의 plan id는 빈 결과를 반환합니다.
//! 404는 반환하지 않습니다.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use journal_analytics::{
    BalancePoint, DateWindow, NetProfitPoint, SymbolStat, WeekdayStat, YearStats,
};
use journal_core::Symbol;

use crate::auth::JwtAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::state::AppState;

// ==================== 쿼리 파라미터 ====================

/// 캘린더 조회 쿼리 파라미터.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// 조회 연도 (예: 2025)
    pub year: i32,
}

/// 날짜 구간/종목 필터 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    /// 진입 날짜 하한 (YYYY-MM-DD)
    pub from_date: Option<NaiveDate>,
    /// 청산 날짜 상한 (YYYY-MM-DD)
    pub to_date: Option<NaiveDate>,
    /// 종목 필터 (예: EURUSD)
    pub symbol: Option<String>,
}

impl RangeQuery {
    /// 쿼리 파라미터를 날짜 구간으로 변환합니다.
    fn window(&self) -> DateWindow {
        DateWindow::new(self.from_date, self.to_date)
    }

    /// 종목 필터를 파싱합니다. 알 수 없는 종목은 400으로 거부합니다.
    fn parse_symbol(&self) -> ApiResult<Option<Symbol>> {
        match &self.symbol {
            None => Ok(None),
            Some(raw) => Symbol::from_str(raw)
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("알 수 없는 종목: {raw}"))),
        }
    }
}

// ==================== 핸들러 ====================

/// 거래가 존재하는 연도 목록 조회 (내림차순).
///
/// GET /api/v1/plans/{plan_id}/analytics/years
#[utoipa::path(
    get,
    path = "/api/v1/plans/{plan_id}/analytics/years",
    params(
        ("plan_id" = Uuid, Path, description = "트레이딩 플랜 ID")
    ),
    responses(
        (status = 200, description = "연도 목록 (내림차순)", body = Vec<i32>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_trade_years(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(plan_id): Path<Uuid>,
) -> ApiResult<Json<Vec<i32>>> {
    let cancel = state.request_token();
    let years = state
        .engine
        .trade_years(claims.user_id(), plan_id, &cancel)
        .await?;
    Ok(Json(years))
}

/// 연간 손익 캘린더 및 연간 통계 조회.
///
/// GET /api/v1/plans/{plan_id}/analytics/calendar?year=2025
#[utoipa::path(
    get,
    path = "/api/v1/plans/{plan_id}/analytics/calendar",
    params(
        ("plan_id" = Uuid, Path, description = "트레이딩 플랜 ID"),
        ("year" = i32, Query, description = "조회 연도")
    ),
    responses(
        (status = 200, description = "연간 캘린더와 통계", body = YearStats),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(plan_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Json<YearStats>> {
    let cancel = state.request_token();
    let stats = state
        .engine
        .calendar_by_year(claims.user_id(), plan_id, query.year, &cancel)
        .await?;
    Ok(Json(stats))
}

/// 잔고 곡선(equity curve) 조회.
///
/// GET /api/v1/plans/{plan_id}/analytics/chart/balance
#[utoipa::path(
    get,
    path = "/api/v1/plans/{plan_id}/analytics/chart/balance",
    params(
        ("plan_id" = Uuid, Path, description = "트레이딩 플랜 ID")
    ),
    responses(
        (status = 200, description = "잔고 시계열 (청산 시각 오름차순)", body = Vec<BalancePoint>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_chart_balance(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(plan_id): Path<Uuid>,
) -> ApiResult<Json<Vec<BalancePoint>>> {
    let cancel = state.request_token();
    let points = state
        .engine
        .chart_balance(claims.user_id(), plan_id, &cancel)
        .await?;
    Ok(Json(points))
}

/// 일별 순손익 시리즈 조회.
///
/// GET /api/v1/plans/{plan_id}/analytics/chart/net-profit
#[utoipa::path(
    get,
    path = "/api/v1/plans/{plan_id}/analytics/chart/net-profit",
    params(
        ("plan_id" = Uuid, Path, description = "트레이딩 플랜 ID")
    ),
    responses(
        (status = 200, description = "일별 순손익 (날짜 오름차순)", body = Vec<NetProfitPoint>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_chart_net_profit(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(plan_id): Path<Uuid>,
) -> ApiResult<Json<Vec<NetProfitPoint>>> {
    let cancel = state.request_token();
    let points = state
        .engine
        .chart_net_profit(claims.user_id(), plan_id, &cancel)
        .await?;
    Ok(Json(points))
}

/// 종목별 손익 합계 조회.
///
/// GET /api/v1/plans/{plan_id}/analytics/symbols?fromDate=&toDate=
#[utoipa::path(
    get,
    path = "/api/v1/plans/{plan_id}/analytics/symbols",
    params(
        ("plan_id" = Uuid, Path, description = "트레이딩 플랜 ID"),
        ("fromDate" = Option<NaiveDate>, Query, description = "진입 날짜 하한"),
        ("toDate" = Option<NaiveDate>, Query, description = "청산 날짜 상한")
    ),
    responses(
        (status = 200, description = "종목별 손익", body = Vec<SymbolStat>),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_symbol_breakdown(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(plan_id): Path<Uuid>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<SymbolStat>>> {
    let cancel = state.request_token();
    let stats = state
        .engine
        .symbol_breakdown(claims.user_id(), plan_id, query.window(), &cancel)
        .await?;
    Ok(Json(stats))
}

/// 요일별 손익 합계 조회 (일요일=0 .. 토요일=6, 오름차순).
///
/// GET /api/v1/plans/{plan_id}/analytics/weekdays?fromDate=&toDate=&symbol=
#[utoipa::path(
    get,
    path = "/api/v1/plans/{plan_id}/analytics/weekdays",
    params(
        ("plan_id" = Uuid, Path, description = "트레이딩 플랜 ID"),
        ("fromDate" = Option<NaiveDate>, Query, description = "진입 날짜 하한"),
        ("toDate" = Option<NaiveDate>, Query, description = "청산 날짜 상한"),
        ("symbol" = Option<String>, Query, description = "종목 필터 (예: EURUSD)")
    ),
    responses(
        (status = 200, description = "요일별 손익 (요일 인덱스 오름차순)", body = Vec<WeekdayStat>),
        (status = 400, description = "알 수 없는 종목", body = ApiErrorResponse),
        (status = 401, description = "인증 실패", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "analytics"
)]
pub async fn get_weekday_breakdown(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(plan_id): Path<Uuid>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<WeekdayStat>>> {
    let symbol = query.parse_symbol()?;
    let cancel = state.request_token();
    let stats = state
        .engine
        .weekday_breakdown(claims.user_id(), plan_id, query.window(), symbol, &cancel)
        .await?;
    Ok(Json(stats))
}

/// 분석 라우터 생성.
pub fn analytics_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{plan_id}/analytics/years", get(get_trade_years))
        .route("/{plan_id}/analytics/calendar", get(get_calendar))
        .route("/{plan_id}/analytics/chart/balance", get(get_chart_balance))
        .route(
            "/{plan_id}/analytics/chart/net-profit",
            get(get_chart_net_profit),
        )
        .route("/{plan_id}/analytics/symbols", get(get_symbol_breakdown))
        .route("/{plan_id}/analytics/weekdays", get(get_weekday_breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_query_window() {
        let query = RangeQuery {
            from_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            to_date: None,
            symbol: None,
        };
        let window = query.window();
        assert_eq!(window.from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert!(window.to.is_none());
    }

    #[test]
    fn test_parse_symbol_valid() {
        let query = RangeQuery {
            symbol: Some("EURUSD".to_string()),
            ..Default::default()
        };
        assert_eq!(query.parse_symbol().unwrap(), Some(Symbol::EurUsd));
    }

    #[test]
    fn test_parse_symbol_unknown_is_bad_request() {
        let query = RangeQuery {
            symbol: Some("DOGEUSD".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.parse_symbol(),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_symbol_absent() {
        let query = RangeQuery::default();
        assert_eq!(query.parse_symbol().unwrap(), None);
    }
}
