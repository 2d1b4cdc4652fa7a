pub mod errors;
pub mod metrics;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{run, run_until, shutdown_on};
pub use state::AppState;
