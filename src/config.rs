use crate::{Error, Result};
use rdkafka::ClientConfig;
use std::time::Duration;

pub const DEFAULT_BROKER: &str = "localhost:19092";
pub const DEFAULT_TOPIC: &str = "test-pbgsmt";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub kafka: KafkaConfig,
    pub topic: TopicConfig,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    /// Highest broker protocol version the client assumes, e.g. "2.6.0".
    pub max_protocol_version: String,
    pub fetch_max_bytes: u32,
    pub max_concurrent_fetches: u32,
    pub keep_control_records: bool,
    pub metadata_min_age_ms: u64,
    pub metadata_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TopicConfig {
    pub name: String,
    pub partitions: i32,
    pub replication_factor: i32,
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub timeout: Duration,
}

impl Config {
    /// Builds a configuration for the given brokers and topic, keeping every
    /// other option at its default.
    pub fn new(brokers: Vec<String>, topic: impl Into<String>) -> Self {
        Self {
            kafka: KafkaConfig {
                brokers,
                ..KafkaConfig::default()
            },
            topic: TopicConfig {
                name: topic.into(),
                ..TopicConfig::default()
            },
            publish: PublishConfig::default(),
        }
    }
}

impl KafkaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.brokers.is_empty() {
            return Err(Error::Config("at least one broker address is required".to_string()));
        }

        for broker in &self.brokers {
            let (host, port) = broker.rsplit_once(':').ok_or_else(|| {
                Error::Config(format!("broker address '{}' must be host:port", broker))
            })?;

            if host.trim().is_empty() {
                return Err(Error::Config(format!(
                    "broker address '{}' has an empty host",
                    broker
                )));
            }

            if port.parse::<u16>().is_err() {
                return Err(Error::Config(format!(
                    "broker address '{}' has an invalid port",
                    broker
                )));
            }
        }

        Ok(())
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    /// Renders the options as librdkafka properties shared by the producer
    /// and the admin client.
    pub fn client_config(&self, publish: &PublishConfig) -> ClientConfig {
        let isolation_level = if self.keep_control_records {
            "read_uncommitted"
        } else {
            "read_committed"
        };

        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", self.brokers.join(","))
            .set("broker.version.fallback", &self.max_protocol_version)
            .set("fetch.max.bytes", self.fetch_max_bytes.to_string())
            .set(
                "max.in.flight.requests.per.connection",
                self.max_concurrent_fetches.to_string(),
            )
            .set("isolation.level", isolation_level)
            .set(
                "topic.metadata.refresh.fast.interval.ms",
                self.metadata_min_age_ms.to_string(),
            )
            .set("message.timeout.ms", publish.timeout.as_millis().to_string());
        client_config
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: vec![DEFAULT_BROKER.to_string()],
            max_protocol_version: default_max_protocol_version(),
            fetch_max_bytes: default_fetch_max_bytes(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            keep_control_records: true,
            metadata_min_age_ms: default_metadata_min_age_ms(),
            metadata_timeout_secs: default_metadata_timeout_secs(),
        }
    }
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOPIC.to_string(),
            partitions: 1,
            replication_factor: 1,
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

fn default_max_protocol_version() -> String {
    "2.6.0".to_string()
}

fn default_fetch_max_bytes() -> u32 {
    5_000_000 // 5MB
}

fn default_max_concurrent_fetches() -> u32 {
    12
}

fn default_metadata_min_age_ms() -> u64 {
    250
}

fn default_metadata_timeout_secs() -> u64 {
    30
}
