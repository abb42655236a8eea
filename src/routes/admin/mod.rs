mod handler;
mod model;

pub use handler::{clear_rate_limits, list_rate_limits};
