mod advertised_ip;
mod logging;

pub use advertised_ip::resolve_advertised_ip;
pub use logging::init_logging;

use rebind_dns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config_summary(config: &Config) {
    info!(
        root = %config.zone.root,
        ttl = config.zone.ttl,
        serial_suffix = %config.zone.serial_suffix,
        port = config.server.dns_port,
        bind = %config.server.bind_address,
        upstream = %config.upstream.resolver,
        upstream_timeout_ms = config.upstream.query_timeout_ms,
        "Configuration loaded"
    );
}
