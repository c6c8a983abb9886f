use env_logger::{Builder, Env};
use log::LevelFilter;

/// Info by default, `RUST_LOG` overrides.
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default))
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .init();
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}
