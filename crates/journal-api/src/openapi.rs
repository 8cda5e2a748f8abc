//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use journal_analytics::{
    BalancePoint, CalendarDayBucket, NetProfitPoint, SymbolStat, WeekdayStat, YearStats,
};
use journal_core::Symbol;

use crate::error::ApiErrorResponse;
use crate::routes::{ComponentHealth, ComponentStatus, HealthResponse};

/// JWT Bearer 인증 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Trading Journal API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trading Journal Analytics API",
        version = "0.1.0",
        description = r#"
# 매매일지 분석 REST API

트레이딩 플랜 단위의 읽기 전용 분석 뷰를 제공합니다.

## 주요 기능

- **연도 목록**: 거래가 존재하는 연도 (내림차순)
- **손익 캘린더**: 연간 일별 손익 레벨과 연간 통계
- **잔고 곡선**: 청산 시각 기준 equity curve
- **일별 순손익**: 진입 날짜별 순손익 시리즈
- **종목/요일 손익**: 날짜 구간 필터가 적용된 집계

## 인증

모든 분석 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.

존재하지 않거나 타인 소유의 플랜은 404 대신 빈 결과를 반환합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "analytics", description = "분석 - 플랜 단위 손익 집계 및 차트")
    ),
    modifiers(&SecurityAddon),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            Symbol,

            // ===== Analytics =====
            YearStats,
            CalendarDayBucket,
            BalancePoint,
            NetProfitPoint,
            SymbolStat,
            WeekdayStat,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Analytics =====
        crate::routes::analytics::get_trade_years,
        crate::routes::analytics::get_calendar,
        crate::routes::analytics::get_chart_balance,
        crate::routes::analytics::get_chart_net_profit,
        crate::routes::analytics::get_symbol_breakdown,
        crate::routes::analytics::get_weekday_breakdown,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Trading Journal Analytics API"));
        assert!(json.contains("health"));
        assert!(json.contains("analytics"));

        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/v1/plans/{plan_id}/analytics/years"));
        assert!(json.contains("/api/v1/plans/{plan_id}/analytics/chart/net-profit"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("HealthResponse"));
        assert!(json.contains("YearStats"));
        assert!(json.contains("WeekdayStat"));
        assert!(json.contains("ApiErrorResponse"));
    }
}
