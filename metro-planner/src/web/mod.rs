//! Web layer for the metro planner.
//!
//! JSON endpoints over the shared network snapshot.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, SharedNetwork};
