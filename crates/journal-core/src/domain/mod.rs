//! 도메인 모델.
//!
//! - [`trade`]: 거래 기록 타입

pub mod trade;

pub use trade::*;
