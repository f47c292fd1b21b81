pub mod config;
mod http_layers;
pub mod metrics;
pub mod server;
mod session;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use session::{DashboardSession, COOKIE_SESSION_TOKEN_KEY, HEADER_SESSION_TOKEN_KEY};
