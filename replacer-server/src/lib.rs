pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::app;
pub use state::AppState;
