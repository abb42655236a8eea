use cache::operations::RedisCounterStore;
use config::Config;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: RedisCounterStore,
}
