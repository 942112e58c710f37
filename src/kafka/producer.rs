use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer, PurgeConfig};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::debug;

/// A single keyed record ready to be produced. No headers are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRecord {
    pub topic: String,
    pub key: Bytes,
    pub value: Bytes,
    pub timestamp_ms: i64,
}

/// Where a record landed once the broker acknowledged it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Produces `record` and waits for the acknowledgement, giving up once
    /// `deadline` has elapsed since the call started.
    async fn send(&self, record: &OutboundRecord, deadline: Duration) -> Result<Delivery>;
}

pub struct KafkaProducer {
    producer: FutureProducer,
}

impl KafkaProducer {
    pub fn new(producer: FutureProducer) -> Self {
        Self { producer }
    }

    /// Waits for outstanding deliveries before the producer is dropped.
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        self.producer.flush(Timeout::After(timeout))?;
        Ok(())
    }

    /// Drops queued and in-flight records without waiting for the broker, so
    /// a record that already missed its deadline never becomes visible.
    pub fn purge(&self) {
        self.producer.purge(PurgeConfig::default().queue().inflight());
    }

    /// Records still awaiting a delivery report.
    pub fn pending(&self) -> i32 {
        self.producer.in_flight_count()
    }
}

#[async_trait]
impl RecordSink for KafkaProducer {
    async fn send(&self, record: &OutboundRecord, deadline: Duration) -> Result<Delivery> {
        let future_record = FutureRecord::to(&record.topic)
            .key(&record.key[..])
            .payload(&record.value[..])
            .timestamp(record.timestamp_ms);

        let delivery = tokio::time::timeout(
            deadline,
            self.producer.send(future_record, Timeout::After(deadline)),
        )
        .await
        .map_err(|_| Error::Timeout {
            message: format!(
                "no acknowledgement for record on '{}' within {:?}",
                record.topic, deadline
            ),
        })?;

        let (partition, offset) = delivery.map_err(|(e, _)| match e {
            KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut) => Error::Timeout {
                message: format!(
                    "record on '{}' expired before acknowledgement: {}",
                    record.topic, e
                ),
            },
            e => Error::Publish {
                message: e.to_string(),
            },
        })?;

        debug!(partition, offset, "Record acknowledged");
        Ok(Delivery { partition, offset })
    }
}
