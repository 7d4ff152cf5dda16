pub mod config;
mod http_layers;
mod recommend;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use recommend::make_recommendation_routes;
pub use server::{make_app, run_server};
