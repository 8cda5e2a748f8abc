//! 데이터 접근 계층.
//!
//! - [`trades`]: PostgreSQL 거래 원장

pub mod trades;

pub use trades::PgTradeLedger;
