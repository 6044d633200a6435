use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
    EnvFilter,
};

use crate::{Error, NodeConfig};

const S300_APPS_CONFIG_ENV_NAME: &str = "S300_APPS_CONFIG_PATH";

/// Get node config path from input or env S300_APPS_CONFIG_PATH
pub fn get_apps_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(S300_APPS_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Loads the node config from `config_path`, or the defaults if there is none.
pub fn resolve_node_config(config_path: Option<&Path>) -> Result<NodeConfig, Error> {
    let config = match config_path {
        Some(path) => NodeConfig::new(path)?,
        None => NodeConfig::default(),
    };
    debug!(?config_path, ?config, "resolved node config");
    Ok(config)
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
///
/// With `trace_log_dir`, trace events of `s300_tracing` are also written as
/// JSON to a daily rolling file in that directory. Keep the returned guard
/// alive until exit so buffered events are flushed.
pub fn init_tracing(trace_log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    match trace_log_dir {
        Some(dir) => {
            let file = tracing_appender::rolling::daily(dir, "trace");
            let (writer, guard) = tracing_appender::non_blocking(file);
            let json = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_current_span(false)
                .with_filter(Targets::new().with_target("s300_tracing", LevelFilter::TRACE));
            tracing_subscriber::registry()
                .with(stderr)
                .with(json)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(stderr).init();
            None
        }
    }
}
