//! 매매일지 분석 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 헬스 체크와 플랜 단위 거래 분석 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Extension, Router};
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use journal_api::auth::JwtConfig;
use journal_api::openapi::swagger_ui_router;
use journal_api::routes::create_api_router;
use journal_api::state::AppState;
use journal_analytics::InMemoryTradeLedger;
use journal_core::{init_logging, AppConfig, LogConfig};

/// AppState 초기화.
///
/// DATABASE_URL(또는 설정 파일)이 있으면 PostgreSQL 원장을 사용하고,
/// 없으면 빈 인메모리 원장으로 동작합니다.
async fn create_app_state(config: &AppConfig) -> AppState {
    let database_url = config
        .database
        .url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok());

    if let Some(url) = database_url {
        match PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
            .connect(&url)
            .await
        {
            Ok(pool) => {
                if sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok() {
                    info!("PostgreSQL 연결 성공");
                    return AppState::with_pg_pool(pool);
                }
                error!("데이터베이스 연결 검증 실패, 인메모리 원장으로 대체합니다");
            }
            Err(e) => {
                error!("데이터베이스 연결 실패: {}, 인메모리 원장으로 대체합니다", e);
            }
        }
    } else {
        warn!("DATABASE_URL 미설정, 인메모리 원장으로 동작합니다");
    }

    AppState::with_in_memory_ledger(InMemoryTradeLedger::new())
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS에 유효한 origin이 없어 모든 origin을 허용합니다");
                AllowOrigin::any()
            } else {
                info!("CORS 허용 origin {}개 설정", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS 미설정, 모든 origin 허용 (개발 모드)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, jwt_config: JwtConfig, timeout_secs: u64) -> Router {
    Router::new()
        .merge(create_api_router().with_state(state))
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(Extension(jwt_config))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드 및 tracing 초기화
    let config = AppConfig::load()?;
    let log_format = config.logging.format.parse().unwrap_or_default();
    init_logging(LogConfig::new(config.logging.level.clone()).with_format(log_format))?;

    info!("매매일지 분석 API 서버를 시작합니다");

    let jwt_config = JwtConfig {
        secret: config.auth.jwt_secret.clone(),
    };

    // AppState 생성 (DB 연결 포함)
    let state = Arc::new(create_app_state(&config).await);
    info!(
        version = %state.version,
        has_db = state.db_pool.is_some(),
        "애플리케이션 상태 초기화 완료"
    );

    let shutdown_token = state.shutdown.clone();
    let app = create_router(state, jwt_config, config.server.request_timeout_secs);

    let addr = config.bind_addr();
    info!(%addr, "API 서버 수신 대기");
    info!("Swagger UI: http://{}/swagger-ui", addr);
    info!("OpenAPI 스펙: http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()))
        .await?;

    // 종료 시그널 받은 후 진행 중인 분석 연산 취소
    shutdown_token.cancel();
    info!("서버가 정상 종료되었습니다");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료 토큰을 취소하여
/// 진행 중인 분석 연산을 중단시킵니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Ctrl+C 수신, graceful shutdown을 시작합니다");
        }
        _ = terminate => {
            warn!("SIGTERM 수신, graceful shutdown을 시작합니다");
        }
    }

    shutdown_token.cancel();
}
