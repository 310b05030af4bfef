pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;

pub use routes::AppState;
pub use startup::{app, build_state, load_config, run};
