//! Core domain logic for the Mobbex gateway bridge.
//!
//! Provides the activation gate and the collaborator seams the rest of the
//! workspace plugs into: the dependency validator that decides whether the
//! integration is safe to activate, the bootstrapper that orchestrates
//! startup, and the gateway registry the webhook transport resolves handlers
//! from. All host-facing effects (admin notices, route registration,
//! environment probing) go through injected traits so the control flow is
//! testable without a running host platform.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bootstrap;
pub mod env;
pub mod error;
pub mod gateway;
pub mod locale;
pub mod notice;
pub mod validate;

pub use bootstrap::{Bootstrapper, BootstrapState, RouteRegistrar};
pub use env::{EnvironmentProbe, EnvSnapshot};
pub use error::{DependencyErrorKind, DependencyIssue, WebhookFault};
pub use gateway::{GatewayId, GatewayRegistry, PaymentGateway, WebhookRequest, WebhookResponse};
pub use locale::{MessageCatalog, MessageKey};
pub use notice::{NoticeSink, Severity};
pub use validate::{DependencyValidator, ValidationResult};
