use futures::StreamExt;
use lapin::Channel;
use lapin::message::Delivery;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicRejectOptions,
};
use lapin::types::FieldTable;
use tokio::sync::watch;
use tracing::{error, info, warn};

use mailarc_core::AckDecision;
use mailarc_consumer::Consumer;

use crate::error::BrokerError;

/// Tag under which the worker registers itself on the channel.
const CONSUMER_TAG: &str = "mailarc-attachments-worker";

/// Consume deliveries until the shutdown signal flips or the broker cancels
/// the consumer.
///
/// Each delivery is handed to the pipeline and settled by its delivery tag
/// according to the returned [`AckDecision`]. A failure while settling one
/// message is logged and the loop continues; the process never dies on a
/// single delivery.
pub async fn run(
    channel: &Channel,
    queue: &str,
    consumer: &Consumer,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), BrokerError> {
    let mut deliveries = channel
        .basic_consume(
            queue,
            CONSUMER_TAG,
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await
        .map_err(BrokerError::Subscribe)?;

    info!(queue, consumer_tag = CONSUMER_TAG, "consuming");

    loop {
        tokio::select! {
            delivery = deliveries.next() => {
                let Some(delivery) = delivery else {
                    warn!(queue, "delivery stream closed by the broker");
                    return Ok(());
                };
                let delivery = match delivery {
                    Ok(delivery) => delivery,
                    Err(e) => {
                        // Transport-level failure: there is no delivery
                        // handle to settle, the broker will redeliver.
                        error!(queue, error = %e, "failed to receive delivery");
                        continue;
                    }
                };

                // An empty body is the transport's rendition of an absent
                // message; the pipeline classifies it before any parsing.
                let body = (!delivery.data.is_empty()).then_some(&delivery.data[..]);
                let decision = consumer.process(body).await;
                settle(&delivery, decision).await;
            }
            _ = shutdown.changed() => {
                info!(queue, "shutdown signal received, stopping consumer");
                return Ok(());
            }
        }
    }
}

/// Settle a delivery with the broker per the pipeline's decision.
async fn settle(delivery: &Delivery, decision: AckDecision) {
    let result = match decision {
        AckDecision::Ack => delivery.ack(BasicAckOptions::default()).await,
        AckDecision::Reject => {
            delivery
                .reject(BasicRejectOptions { requeue: false })
                .await
        }
        AckDecision::Requeue => {
            delivery
                .nack(BasicNackOptions {
                    requeue: true,
                    ..BasicNackOptions::default()
                })
                .await
        }
    };
    if let Err(e) = result {
        error!(
            delivery_tag = delivery.delivery_tag,
            error = %e,
            "failed to settle delivery"
        );
    }
}
