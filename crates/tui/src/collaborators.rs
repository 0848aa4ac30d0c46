//! Seams for external collaborators the shell calls into.

use async_trait::async_trait;
use contextflow_types::{AuthOutcome, ConnectorId};

/// Runs the authorization flow for a connector offer. Implementations may
/// take as long as they need; the runtime awaits them off the event loop.
#[async_trait]
pub trait ConnectorAuthorizer: Send + Sync + std::fmt::Debug {
    async fn authorize(&self, connector: &ConnectorId) -> AuthOutcome;
}

/// Default authorizer used when nothing is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredAuthorizer;

#[async_trait]
impl ConnectorAuthorizer for UnconfiguredAuthorizer {
    async fn authorize(&self, _connector: &ConnectorId) -> AuthOutcome {
        AuthOutcome::NotConfigured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_authorizer_reports_not_configured() {
        let outcome = UnconfiguredAuthorizer.authorize(&ConnectorId::new("slack")).await;
        assert_eq!(outcome, AuthOutcome::NotConfigured);
    }
}
