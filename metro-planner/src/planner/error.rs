use crate::domain::LookupError;

/// Errors from planner queries.
///
/// "No path" and "unreachable" are not errors; the queries return `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("no line runs express trains between {start} and {end}")]
    NotExpressServed { start: String, end: String },
}
