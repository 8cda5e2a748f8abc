//! JWT 인증 및 권한 관리.
//!
//! - [`jwt`]: 토큰 생성/검증
//! - [`middleware`]: Axum 추출기

pub mod jwt;
pub mod middleware;

pub use jwt::{create_token, decode_token, Claims, JwtError};
pub use middleware::{JwtAuth, JwtAuthError, JwtConfig};
