//! Per-invocation context: cancellation and deadline

use codelens_domain::tool::value_objects::ToolError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Carried with every tool invocation.
///
/// Tools check [`is_cancelled`](Self::is_cancelled) before starting work and
/// race long-running operations against [`cancelled`](Self::cancelled).
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    cancellation: CancellationToken,
    timeout: Option<Duration>,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once the invocation is cancelled
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// A context whose token is cancelled with this one, but can also be
    /// cancelled on its own without affecting the parent.
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            timeout: self.timeout,
        }
    }

    /// `Err(CANCELLED)` when the invocation has already been cancelled
    pub fn check_cancelled(&self) -> Result<(), ToolError> {
        if self.is_cancelled() {
            return Err(ToolError::cancelled());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_cancellation_does_not_propagate_up() {
        let parent = InvocationContext::new().with_timeout(Duration::from_secs(5));
        let child = parent.child();
        assert_eq!(child.timeout(), Some(Duration::from_secs(5)));

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_parent_cancellation_reaches_child() {
        let token = CancellationToken::new();
        let parent = InvocationContext::new().with_cancellation(token.clone());
        let child = parent.child();

        assert!(child.check_cancelled().is_ok());
        token.cancel();
        assert_eq!(child.check_cancelled().unwrap_err().code, "CANCELLED");
    }
}
