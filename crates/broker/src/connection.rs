use lapin::options::{BasicQosOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{Channel, Connection, ConnectionProperties};
use tracing::info;

use crate::config::BrokerConfig;
use crate::error::BrokerError;

/// An established broker session: the connection and a consuming channel.
///
/// The connection handle must stay alive for as long as the channel is in
/// use, so both are owned together and released by [`Broker::close`].
pub struct Broker {
    connection: Connection,
    channel: Channel,
}

impl Broker {
    /// Connect to the broker and prepare a channel for consuming.
    ///
    /// Declares the queue as durable so lifecycle events survive a broker
    /// restart, and applies the configured prefetch so at most that many
    /// deliveries are in flight unacknowledged.
    pub async fn connect(config: &BrokerConfig) -> Result<Self, BrokerError> {
        let connection = Connection::connect(&config.uri, ConnectionProperties::default())
            .await
            .map_err(BrokerError::Connect)?;
        let channel = connection
            .create_channel()
            .await
            .map_err(BrokerError::Setup)?;

        channel
            .basic_qos(config.prefetch_count, BasicQosOptions::default())
            .await
            .map_err(BrokerError::Setup)?;
        channel
            .queue_declare(
                &config.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(BrokerError::Setup)?;

        info!(
            queue = %config.queue,
            prefetch = config.prefetch_count,
            "broker channel ready"
        );
        Ok(Self {
            connection,
            channel,
        })
    }

    /// The channel deliveries are consumed on.
    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Close the underlying connection cleanly.
    pub async fn close(&self) -> Result<(), BrokerError> {
        self.connection
            .close(200, "worker shutdown")
            .await
            .map_err(BrokerError::Close)
    }
}
