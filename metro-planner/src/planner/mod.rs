//! Route planning.
//!
//! Four searches over an immutable [`Network`](crate::network::Network):
//!
//! - [`shortest_path`]: static, weight-minimal route on the line graph
//! - [`fastest_path`]: earliest arrival for a departure instant, against the
//!   live timetables
//! - [`longest_simple_path`]: longest route that repeats no station
//! - [`express_path`]: express stops along the shortest route
//!
//! [`Planner`] wraps them behind name-based lookups.

mod config;
mod error;
mod express;
mod fastest;
mod longest;
mod query;
mod route;
mod shortest;

pub use config::PlannerConfig;
pub use error::PlanError;
pub use express::{ExpressRoute, express_line, express_path};
pub use fastest::fastest_path;
pub use longest::{LongestPath, LongestPathLimits, longest_simple_path};
pub use query::Planner;
pub use route::{Journey, Route};
pub use shortest::shortest_path;
