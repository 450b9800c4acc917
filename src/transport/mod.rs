use async_trait::async_trait;

use crate::error::Result;

pub mod event_hub;

/// Outbound message sink the emitter publishes to.
///
/// The emitter only ever talks to this trait, so tests can swap in a
/// recording mock and the concrete client stays replaceable.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Submits one serialized record as a single message.
    async fn send(&self, payload: &str) -> Result<()>;

    /// Releases the underlying client. Called exactly once by the emitter,
    /// on every exit path.
    async fn close(&self) -> Result<()>;
}
