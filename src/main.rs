mod addon;
mod host;

use std::sync::Arc;

use anyhow::Result;

use addon::AddonRegistry;
use addon::example::{Example, ExampleCall, ExtendedExample};
use host::HostLog;
use host::config::HostConfig;
use host::log::TracingLog;

fn main() -> Result<()> {
    let config = HostConfig::load()?;

    // Initialize logging to file (never stdout)
    let log_dir = directories::ProjectDirs::from("", "", "addonhost")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "addonhost.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(config.general.log_filter.as_str())
        .init();

    tracing::info!("addonhost starting");

    run(config)
}

fn run(config: HostConfig) -> Result<()> {
    let mut registry = AddonRegistry::new(&config);
    for notice in registry.startup_notifications() {
        tracing::info!("{notice}");
    }

    let loaded = registry.load_all();
    tracing::info!("addons: {loaded} loaded");
    for row in registry.list_notifications() {
        tracing::debug!("{row}");
    }

    run_examples(Arc::new(TracingLog));
    Ok(())
}

/// The canonical example scenario: one base call, one overridden call.
fn run_examples(host: Arc<dyn HostLog>) {
    let e = Example::new(host.clone(), "hello in constructor");
    e.call_func();

    let ee = ExtendedExample::new(host, "hello in child constructor");
    ee.call_func();
}
