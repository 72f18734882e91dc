pub mod errors;
pub mod observability;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, run_until};
pub use state::AppState;
