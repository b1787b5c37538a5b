//! Web layer for the journey search application.
//!
//! Provides HTTP endpoints for station lookup and journey search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
