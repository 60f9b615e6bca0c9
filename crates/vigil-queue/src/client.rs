use async_trait::async_trait;

use crate::error::Result;

/// Capability surface over the message broker, independent of broker
/// identity. Producer and viewer only ever talk to this trait.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Declare-if-absent. Idempotent; safe to call from both ends at
    /// startup.
    async fn declare_queue(&self, name: &str) -> Result<()>;

    /// Enqueue one message, fire-and-forget. No delivery confirmation is
    /// awaited.
    async fn publish(&self, name: &str, payload: &[u8]) -> Result<()>;

    /// Non-blocking single-message fetch with auto-acknowledgment: the
    /// broker copy is destroyed the instant the payload is handed back,
    /// whether or not downstream processing succeeds. `Ok(None)` means the
    /// queue was empty at poll time, not an error.
    async fn poll_one(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Release the broker connection. Further operations fail.
    async fn disconnect(&self) -> Result<()>;

    fn is_connected(&self) -> bool;
}
