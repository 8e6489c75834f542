use thiserror::Error;

/// Errors from the AMQP transport layer.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Establishing the connection failed.
    #[error("failed to connect to broker: {0}")]
    Connect(#[source] lapin::Error),

    /// Preparing the channel, prefetch, or queue failed.
    #[error("failed to set up the channel: {0}")]
    Setup(#[source] lapin::Error),

    /// Registering the consumer on the queue failed.
    #[error("failed to start consuming: {0}")]
    Subscribe(#[source] lapin::Error),

    /// Closing the connection failed.
    #[error("failed to close the connection: {0}")]
    Close(#[source] lapin::Error),
}
