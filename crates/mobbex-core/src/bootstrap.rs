//! Startup orchestration for the integration.
//!
//! The bootstrapper is the single entry point the host invokes during its
//! single-threaded startup phase. It validates the environment and either
//! aborts activation, surfacing every violation as an admin notice, or
//! registers the gateway and the webhook route together. Registration is
//! all-or-nothing: it never happens with a non-empty validation result, and
//! on success both registrations occur in the same run.

use std::{path::PathBuf, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    env::EnvironmentProbe,
    gateway::{GatewayId, GatewayRegistry, PaymentGateway},
    locale::MessageCatalog,
    notice::{NoticeSink, Severity},
    validate::DependencyValidator,
};

/// Lifecycle state of the integration within the host process.
///
/// Transitions are monotonic and happen at most once per process lifetime:
/// `NotLoaded → Validating → {Failed, Active}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Bootstrap has not run yet.
    NotLoaded,
    /// Dependency validation is in progress.
    Validating,
    /// Validation found violations; nothing was registered. Terminal.
    Failed,
    /// Gateway and webhook route are registered. Terminal.
    Active,
}

impl BootstrapState {
    /// Whether this state ends the bootstrap lifecycle.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Active)
    }

    /// Stable name used in diagnostics and the readiness endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotLoaded => "not_loaded",
            Self::Validating => "validating",
            Self::Failed => "failed",
            Self::Active => "active",
        }
    }
}

impl std::fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host capability for exposing the webhook HTTP endpoint.
///
/// Injected into the bootstrapper so route registration is observable in
/// tests without a running transport.
pub trait RouteRegistrar: Send + Sync {
    /// Exposes the webhook endpoint for the given gateway.
    fn register_webhook(&self, gateway: GatewayId);
}

/// Orchestrates startup: validate, then abort with notices or activate.
///
/// Constructed with explicit collaborators so every side effect goes
/// through a substitutable seam. Runs once; re-running after a terminal
/// state is an idempotent no-op.
pub struct Bootstrapper {
    probe: Arc<dyn EnvironmentProbe>,
    gateway: Arc<dyn PaymentGateway>,
    registry: Arc<GatewayRegistry>,
    routes: Arc<dyn RouteRegistrar>,
    notices: Arc<dyn NoticeSink>,
    catalog: MessageCatalog,
    locale_file: Option<PathBuf>,
    state: BootstrapState,
}

impl Bootstrapper {
    /// Creates a bootstrapper over its collaborators.
    pub fn new(
        probe: Arc<dyn EnvironmentProbe>,
        gateway: Arc<dyn PaymentGateway>,
        registry: Arc<GatewayRegistry>,
        routes: Arc<dyn RouteRegistrar>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            probe,
            gateway,
            registry,
            routes,
            notices,
            catalog: MessageCatalog::new(),
            locale_file: None,
            state: BootstrapState::NotLoaded,
        }
    }

    /// Uses a pre-built message catalog instead of the built-in texts.
    #[must_use]
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Loads a locale overlay file (best-effort) before validating.
    #[must_use]
    pub fn with_locale_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.locale_file = Some(path.into());
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Runs the bootstrap sequence once and returns the resulting state.
    ///
    /// After a terminal state has been reached, further calls change
    /// nothing and emit no further notices or registrations.
    pub async fn run(&mut self) -> BootstrapState {
        if self.state.is_terminal() {
            debug!(state = %self.state, "bootstrap already completed, ignoring re-entry");
            return self.state;
        }
        self.state = BootstrapState::Validating;

        // Localization first, so any notices below come out translated.
        if let Some(path) = self.locale_file.clone() {
            self.catalog.load_overlay_best_effort(&path);
        }

        let result = DependencyValidator::new(self.probe.as_ref(), &self.catalog).validate();

        if !result.is_ok() {
            warn!(violations = result.len(), "environment validation failed, integration stays inactive");
            for issue in &result {
                debug!(kind = %issue.kind, "dependency violation");
                self.notices.notify(Severity::Error, &issue.message).await;
            }
            self.state = BootstrapState::Failed;
            return self.state;
        }

        self.registry.register(GatewayId::Mobbex, Arc::clone(&self.gateway));
        self.routes.register_webhook(GatewayId::Mobbex);
        info!(gateway = %GatewayId::Mobbex, "gateway and webhook route registered");

        self.state = BootstrapState::Active;
        self.state
    }
}

impl std::fmt::Debug for Bootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrapper")
            .field("state", &self.state)
            .field("locale_file", &self.locale_file)
            .finish_non_exhaustive()
    }
}
