//! # Journal Core
//!
//! 트레이딩 저널의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 저널 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 거래 기록 (`Trade`)
//! - 심볼 및 포지션 유형 정의
//! - 금융 계산용 Decimal 유틸리티
//! - 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
