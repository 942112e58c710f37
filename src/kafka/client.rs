use crate::config::{KafkaConfig, PublishConfig};
use crate::kafka::KafkaProducer;
use crate::{Error, Result};
use rdkafka::admin::AdminClient;
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::FutureProducer;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The producer and admin client built from one set of client options.
pub struct KafkaClients {
    pub producer: KafkaProducer,
    pub admin: AdminClient<DefaultClientContext>,
}

impl KafkaClients {
    pub fn connect(config: &KafkaConfig, publish: &PublishConfig) -> Result<Self> {
        config.validate()?;

        let client_config = config.client_config(publish);
        debug!(options = ?client_config, "Creating Kafka clients");

        let producer: FutureProducer = client_config.create().map_err(Error::ClientCreation)?;
        let admin: AdminClient<DefaultClientContext> =
            client_config.create().map_err(Error::ClientCreation)?;

        info!(brokers = ?config.brokers, "Kafka clients created");

        Ok(Self {
            producer: KafkaProducer::new(producer),
            admin,
        })
    }

    /// Flushes the producer and releases both clients.
    pub fn close(self, timeout: Duration) {
        if let Err(e) = self.producer.flush(timeout) {
            warn!("Failed to flush producer on close: {}", e);
        }
    }

    /// Purges anything the producer still holds and releases both clients.
    pub fn abort(self) {
        self.producer.purge();
        debug!(pending = self.producer.pending(), "Producer purged");
    }
}
