//! Test harness for the Mobbex gateway bridge.
//!
//! Provides environment fixtures, recording collaborator doubles, and stub
//! gateways so bootstrap and webhook behavior can be exercised without a
//! running host platform.

pub mod env;
pub mod gateways;
pub mod recorders;

use std::sync::Arc;

use mobbex_core::{Bootstrapper, EnvSnapshot, GatewayRegistry, PaymentGateway};
use tracing_subscriber::EnvFilter;

pub use env::{bare_env, satisfied_env};
pub use gateways::{FailingGateway, PanickingGateway, StaticGateway};
pub use recorders::{ErrorCountLayer, RecordedNotice, RecordingNoticeSink, RecordingRegistrar};

/// Initializes tracing for tests. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,mobbex=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Bundle of fresh collaborator doubles around a chosen environment.
pub struct TestEnv {
    /// Environment the validator probes.
    pub env: EnvSnapshot,
    /// Registry the bootstrapper populates.
    pub registry: Arc<GatewayRegistry>,
    /// Recording route registrar.
    pub routes: Arc<RecordingRegistrar>,
    /// Recording notice sink.
    pub notices: Arc<RecordingNoticeSink>,
}

impl TestEnv {
    /// Harness around an environment that satisfies every check.
    pub fn satisfied() -> Self {
        Self::with_env(satisfied_env())
    }

    /// Harness around an arbitrary environment snapshot.
    pub fn with_env(env: EnvSnapshot) -> Self {
        init_test_tracing();
        Self {
            env,
            registry: Arc::new(GatewayRegistry::new()),
            routes: Arc::new(RecordingRegistrar::new()),
            notices: Arc::new(RecordingNoticeSink::new()),
        }
    }

    /// Builds a bootstrapper wired to this harness's doubles.
    pub fn bootstrapper(&self, gateway: Arc<dyn PaymentGateway>) -> Bootstrapper {
        Bootstrapper::new(
            Arc::new(self.env.clone()),
            gateway,
            Arc::clone(&self.registry),
            self.routes.clone(),
            self.notices.clone(),
        )
    }
}
