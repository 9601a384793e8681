use async_trait::async_trait;

/// A subscribed pub/sub channel yielding invalidation messages strictly in
/// arrival order. `None` means the stream closed; reconnection policy
/// belongs to the caller.
#[async_trait]
pub trait InvalidationChannel: Send {
    async fn recv(&mut self) -> Option<String>;
}
