mod analytics_routes;
pub mod config;
mod data_routes;
pub mod errors;
mod http_layers;
pub mod metrics;
pub mod server;
pub mod state;

pub use analytics_routes::AnalyticsQuery;
pub use config::ServerConfig;
pub(self) use analytics_routes::make_analytics_routes;
pub(self) use data_routes::{make_data_routes, make_search_routes};
pub use http_layers::*;
pub use server::{make_app, run_server};
