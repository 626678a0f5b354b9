//! Mobbex gateway bridge service.
//!
//! Entry point wiring the collaborators together: loads configuration,
//! runs the bootstrap sequence against the described host environment, and
//! serves the HTTP surface. When validation fails the process still serves
//! health probes, but the integration stays inactive and the webhook route
//! answers 404.

use std::sync::Arc;

use anyhow::{Context, Result};
use mobbex_api::{start_server, AppState, Config, RouteTable};
use mobbex_core::{
    notice::TracingNoticeSink, BootstrapState, Bootstrapper, GatewayRegistry, PaymentGateway,
    RouteRegistrar, WebhookRequest, WebhookResponse,
};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Mobbex gateway bridge");

    let config = Config::load()?;
    let addr = config.server_addr().context("Invalid server address")?;
    info!(server_addr = %addr, request_timeout = config.request_timeout, "Configuration loaded");

    let registry = Arc::new(GatewayRegistry::new());
    let routes = Arc::new(RouteTable::new());

    let mut bootstrapper = Bootstrapper::new(
        Arc::new(config.environment()),
        Arc::new(AckGateway),
        Arc::clone(&registry),
        Arc::clone(&routes) as Arc<dyn RouteRegistrar>,
        Arc::new(TracingNoticeSink::new()),
    );
    if let Some(path) = &config.locale_file {
        bootstrapper = bootstrapper.with_locale_file(path);
    }

    let bootstrap = bootstrapper.run().await;
    match bootstrap {
        BootstrapState::Active => info!("Integration active, webhook endpoint registered"),
        _ => warn!(state = %bootstrap, "Integration inactive, webhook endpoint not registered"),
    }

    let state = AppState { registry, routes, bootstrap };
    start_server(state, addr, config.request_timeout()).await?;

    info!("Mobbex gateway bridge shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,mobbex=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Stand-in gateway wired at the registration seam.
///
/// Acknowledges every notification; the actual payment semantics (charge
/// lookup, order transitions) belong to the gateway collaborator deployed
/// alongside this service, which replaces this type at the same seam.
#[derive(Debug, Default)]
struct AckGateway;

#[async_trait::async_trait]
impl PaymentGateway for AckGateway {
    async fn handle_webhook(&self, request: WebhookRequest) -> Result<WebhookResponse> {
        debug!(params = %request.params, "acknowledging provider notification");
        Ok(WebhookResponse::ok())
    }
}
