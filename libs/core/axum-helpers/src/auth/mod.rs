//! Stateless JWT session-token authentication.
//!
//! Session tokens are signed, time-bounded claims carrying the user
//! identity. Nothing is persisted server-side: possession of a token
//! with a valid signature and unexpired `exp` is the whole proof.

mod config;
mod jwt;

pub use config::JwtConfig;
pub use jwt::{bearer_token, JwtAuth, JwtClaims, SESSION_TOKEN_TTL};
