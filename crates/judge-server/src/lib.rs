//! HTTP boundary for stock-judge
//!
//! Exposes company search, metric retrieval, evaluation, and the two-stage AI
//! narrative over JSON. Every failure is answered with
//! `{ "message": ..., "code": ... }` and the error's HTTP status.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
