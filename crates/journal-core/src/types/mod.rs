//! 공용 타입 정의.
//!
//! - [`decimal`]: 금융 계산용 Decimal 유틸리티
//! - [`symbol`]: 거래 가능한 상품 심볼

pub mod decimal;
pub mod symbol;

pub use decimal::*;
pub use symbol::*;
