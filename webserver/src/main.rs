//! WebServer entry point

use std::net::SocketAddr;

use clap::Parser;
use resolver::{OfflineScoringClient, RealScoringClient, ScoringClient, StuffPlusResolver};
use shared::config::{DEFAULT_SCORING_URL, SCORING_URL_ENV};
use shared::{ScoringEndpoint, ServiceId, logging};

use webserver::{RealClientRegistry, WebServer, WebServerError, WebServerResult};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Stuff+ pitch tracker web server")]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP server
    #[arg(long, env = "STUFF_PLUS_PORT", default_value = "8080")]
    port: u16,

    /// Base URL of the remote scoring API
    #[arg(long, env = SCORING_URL_ENV, default_value = DEFAULT_SCORING_URL)]
    api_url: String,

    /// Score with the local formula only
    #[arg(long)]
    local_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    ServiceId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ServiceId::current(), &format!("Stuff+ webserver v{}", env!("CARGO_PKG_VERSION")));

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))?;

    if args.local_only {
        serve(bind_address, StuffPlusResolver::new(OfflineScoringClient)).await?;
    } else {
        let endpoint = ScoringEndpoint::parse(&args.api_url)?;
        serve(bind_address, StuffPlusResolver::new(RealScoringClient::new(endpoint))).await?;
    }

    logging::log_success(ServiceId::current(), "WebServer stopped gracefully");
    Ok(())
}

async fn serve<C: ScoringClient + 'static>(bind_address: SocketAddr, resolver: StuffPlusResolver<C>) -> WebServerResult<()> {
    let webserver = WebServer::new(bind_address, resolver, RealClientRegistry::new());
    webserver.run().await
}
