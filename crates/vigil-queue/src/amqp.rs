use async_trait::async_trait;
use lapin::options::{BasicGetOptions, BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use tracing::{debug, info};

use crate::client::QueueClient;
use crate::error::{QueueError, Result};

/// AMQP implementation of [`QueueClient`].
///
/// The connection is an explicitly owned object: created once in `main`,
/// handed to the loop that uses it, and released through [`disconnect`]
/// on every exit path.
///
/// [`disconnect`]: QueueClient::disconnect
pub struct AmqpClient {
    connection: Connection,
    channel: Channel,
}

impl AmqpClient {
    /// Connect to the broker. Callers treat a failure here as fatal at
    /// process startup.
    pub async fn connect(url: &str) -> Result<Self> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(QueueError::Connection)?;
        let channel = connection
            .create_channel()
            .await
            .map_err(QueueError::Connection)?;

        info!(url = %url, "connected to broker");

        Ok(Self {
            connection,
            channel,
        })
    }
}

#[async_trait]
impl QueueClient for AmqpClient {
    async fn declare_queue(&self, name: &str) -> Result<()> {
        self.channel
            .queue_declare(name, QueueDeclareOptions::default(), FieldTable::default())
            .await
            .map_err(QueueError::Declare)?;
        debug!(queue = %name, "queue declared");
        Ok(())
    }

    async fn publish(&self, name: &str, payload: &[u8]) -> Result<()> {
        // Default exchange, queue name as routing key. The returned
        // confirmation future is dropped: publishes are fire-and-forget.
        self.channel
            .basic_publish(
                "",
                name,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default(),
            )
            .await
            .map_err(QueueError::Publish)?;
        Ok(())
    }

    async fn poll_one(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let message = self
            .channel
            .basic_get(name, BasicGetOptions { no_ack: true })
            .await
            .map_err(QueueError::Poll)?;
        Ok(message.map(|m| m.delivery.data))
    }

    async fn disconnect(&self) -> Result<()> {
        self.connection
            .close(200, "client shutdown")
            .await
            .map_err(QueueError::Connection)?;
        debug!("disconnected from broker");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connection.status().connected()
    }
}
