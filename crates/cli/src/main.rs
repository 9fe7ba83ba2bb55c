use clap::Parser;
use rebind_dns_domain::CliOverrides;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "rebind-dns")]
#[command(version = "0.1.0")]
#[command(about = "Rebind DNS - authoritative responder for DNS rebinding tests")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Listen address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Zone root domain
    #[arg(long)]
    root: Option<String>,

    /// Address advertised for the zone (resolved from the root when omitted)
    #[arg(long)]
    ip: Option<Ipv4Addr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        root: cli.root.clone(),
        ip: cli.ip,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Rebind DNS v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config_summary(&config);

    let advertised_ip = bootstrap::resolve_advertised_ip(&config.zone).await?;
    let dns_services = di::DnsServices::new(&config, advertised_ip)?;

    let bind_ip: IpAddr = config.server.bind_address.parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid bind address '{}': {}",
            config.server.bind_address,
            e
        )
    })?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);

    let mut dns_server = server::start_dns_server(
        dns_addr,
        dns_services.handler,
        Duration::from_secs(config.server.tcp_timeout_secs),
    )
    .await?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        _ = dns_server.closed() => {
            warn!("DNS listener stopped unexpectedly");
        }
    }

    dns_server.shutdown().await;

    info!(
        tracked_clients = dns_services.clients.len(),
        "Server shutdown complete"
    );
    Ok(())
}
