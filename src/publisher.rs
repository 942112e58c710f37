use crate::kafka::{
    KafkaClients, KafkaTopicAdmin, OutboundRecord, ProtobufSerializer, RecordSink, TopicManager,
    TopicStatus,
};
use crate::package::Package;
use crate::{Config, Result};
use bytes::Bytes;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;
use tracing::{info, instrument};

const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds and publishes one [`Package`] record per call.
pub struct Publisher<'a, S: ?Sized> {
    sink: &'a S,
    topic: String,
    timeout: Duration,
}

impl<'a, S: RecordSink + ?Sized> Publisher<'a, S> {
    pub fn new(sink: &'a S, topic: impl Into<String>, timeout: Duration) -> Self {
        Self {
            sink,
            topic: topic.into(),
            timeout,
        }
    }

    /// Generates a package from `rng`, publishes it keyed by its id and
    /// returns it once the broker has acknowledged the record.
    #[instrument(skip(self, rng), fields(topic = %self.topic))]
    pub async fn publish_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Package> {
        let package = Package::generate(rng, Utc::now());
        let value = ProtobufSerializer::serialize(&package)?;

        let record = OutboundRecord {
            topic: self.topic.clone(),
            key: Bytes::copy_from_slice(package.id.as_bytes()),
            value,
            timestamp_ms: Utc::now().timestamp_millis(),
        };

        self.sink.send(&record, self.timeout).await?;

        info!("created message: {}", package.id);
        Ok(package)
    }
}

/// Outcome of a full run, mainly for callers that want to report it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub topic_status: TopicStatus,
    pub package: Package,
}

/// Creates the clients, ensures the topic exists and publishes one package.
pub async fn run<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<RunSummary> {
    let clients = KafkaClients::connect(&config.kafka, &config.publish)?;

    let summary = publish_with(&clients, config, rng).await;

    // A failed run must not let a late acknowledgement publish the record.
    match &summary {
        Ok(_) => clients.close(CLOSE_TIMEOUT),
        Err(_) => clients.abort(),
    }
    summary
}

async fn publish_with<R: Rng + ?Sized>(
    clients: &KafkaClients,
    config: &Config,
    rng: &mut R,
) -> Result<RunSummary> {
    let admin = KafkaTopicAdmin::new(&clients.admin, config.kafka.metadata_timeout());
    let topic_status = TopicManager::from_config(admin, &config.topic)
        .ensure_topic_exists(&config.topic.name)
        .await?;

    let package = Publisher::new(&clients.producer, &config.topic.name, config.publish.timeout)
        .publish_one(rng)
        .await?;

    Ok(RunSummary {
        topic_status,
        package,
    })
}
